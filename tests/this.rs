#[macro_use]
mod common;

#[cfg(test)]
mod this {
    tests! {
        closure is OK
        r#"
        class Foo {
            getClosure() {
                fun closure() {
                    return this.toString();
                }
                return closure;
            }

            toString() { return "Foo"; }
        }

        var closure = Foo().getClosure();
        print closure();
        "#,
        "Foo"
    }

    tests! {
        nested_class is OK
        r#"
        class Outer {
            method() {
                print this;

                fun f() {
                    fun g() {
                        print this;

                        class Inner {
                            method() {
                                print this;
                            }
                        }

                        Inner().method();
                    }
                    g();
                }
                f();
            }
        }

        Outer().method();
        "#,
        "Outer instance", "Outer instance", "Inner instance"
    }

    tests! {
        nested_closure is OK
        r#"
        class Foo {
            getClosure() {
                fun f() {
                    fun g() {
                        return this.toString();
                    }
                    return g;
                }
                return f();
            }

            toString() { return "Foo"; }
        }

        var closure = Foo().getClosure();
        print closure();
        "#,
        "Foo"
    }

    tests! {
        this_at_top_level is ERR
        r#"print this;"#,
        "[line 1] Error at 'this': Can't use 'this' outside of a class."
    }

    tests! {
        this_in_method is OK
        r#"
        class Foo {
            bar() {
                this.baz = "baz";
                return this.baz;
            }
        }

        print Foo().bar();
        "#,
        "baz"
    }

    tests! {
        this_in_top_level_function is ERR
        r#"
        fun notAMethod() {
            print this;
        }
        "#,
        "[line 3] Error at 'this': Can't use 'this' outside of a class."
    }
}
