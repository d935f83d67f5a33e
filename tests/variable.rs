#[macro_use]
mod common;

#[cfg(test)]
mod variable {
    tests! {
        collide_with_parameter is ERR
        r#"
        fun foo(a) {
            var a;
        }
        "#,
        "[line 3] Error at 'a': Already a variable with this name in this scope."
    }

    tests! {
        duplicate_local is ERR
        r#"
        {
            var a = "value";
            var a = "other";
        }
        "#,
        "[line 4] Error at 'a': Already a variable with this name in this scope."
    }

    tests! {
        duplicate_parameter is ERR
        r#"fun foo(arg, arg) {}"#,
        "[line 1] Error at 'arg': Already a variable with this name in this scope."
    }

    tests! {
        early_bound is OK
        r#"
        var a = "outer";
        {
            fun foo() {
                print a;
            }

            foo();
            var a = "inner";
            foo();
        }
        "#,
        "outer", "outer"
    }

    tests! {
        in_middle_of_block is OK
        r#"
        {
            var a = "a";
            print a;
            var b = a + " b";
            print a + " " + b;

            var c = a + " c";
            print a + " " + c;

            var d = b + " d";
            print a + " " + b + " " + d;
        }
        "#,
        "a", "a b", "a c", "a b d"
    }

    tests! {
        in_nested_block is OK
        r#"
        {
            var a = "outer";
            {
                print a;
            }
        }
        "#,
        "outer"
    }

    tests! {
        local_from_method is OK
        r#"
        var foo = "variable";

        class Foo {
            method() {
                print foo;
            }
        }

        Foo().method();
        "#,
        "variable"
    }

    tests! {
        redeclare_global is OK
        r#"
        var a = "1";
        var a;
        print a;
        "#,
        "nil"
    }

    tests! {
        redefine_global is OK
        r#"
        var a = "1";
        var a = "2";
        print a;
        "#,
        "2"
    }

    tests! {
        scope_reuse_in_different_blocks is OK
        r#"
        {
            var a = "first";
            print a;
        }

        {
            var a = "second";
            print a;
        }
        "#,
        "first", "second"
    }

    tests! {
        shadow_and_local is OK
        r#"
        {
            var a = "outer";
            {
                print a;
                var a = "inner";
                print a;
            }
        }
        "#,
        "outer", "inner"
    }

    tests! {
        shadow_global is OK
        r#"
        var a = "global";
        {
            var a = "shadow";
            print a;
        }
        print a;
        "#,
        "shadow", "global"
    }

    tests! {
        shadow_local is OK
        r#"
        {
            var a = "local";
            {
                var a = "shadow";
                print a;
            }
            print a;
        }
        "#,
        "shadow", "local"
    }

    tests! {
        undefined_global is ERR
        r#"notDefined;"#,
        "Undefined variable 'notDefined'.",
        "[line 1]"
    }

    tests! {
        undefined_local is ERR
        r#"
        {
            notDefined;
        }
        "#,
        "Undefined variable 'notDefined'.",
        "[line 3]"
    }

    tests! {
        uninitialized is OK
        r#"
        var a;
        print a;
        "#,
        "nil"
    }

    tests! {
        unreached_undefined is OK
        r#"
        if (false) {
            print notDefined;
        }

        print "ok";
        "#,
        "ok"
    }

    tests! {
        use_false_as_var is ERR
        r#"var false = "value";"#,
        "[line 1] Error at 'false': Expect variable name."
    }

    tests! {
        use_global_in_initializer is OK
        r#"
        var a = "value";
        var a = a;
        print a;
        "#,
        "value"
    }

    tests! {
        use_local_in_initializer is ERR
        r#"
        var a = "outer";
        {
            var a = a;
        }
        "#,
        "[line 4] Error at 'a': Can't read local variable in its own initializer."
    }

    tests! {
        use_nil_as_var is ERR
        r#"var nil = "value";"#,
        "[line 1] Error at 'nil': Expect variable name."
    }

    tests! {
        use_this_as_var is ERR
        r#"var this = "value";"#,
        "[line 1] Error at 'this': Expect variable name."
    }
}
