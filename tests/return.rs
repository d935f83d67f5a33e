#[macro_use]
mod common;

#[cfg(test)]
mod _return {
    tests! {
        after_else is OK
        r#"
        fun f() {
            if (false) "no"; else return "ok";
        }

        print f();
        "#,
        "ok"
    }

    tests! {
        after_if is OK
        r#"
        fun f() {
            if (true) return "ok";
        }

        print f();
        "#,
        "ok"
    }

    tests! {
        after_while is OK
        r#"
        fun f() {
            while (true) return "ok";
        }

        print f();
        "#,
        "ok"
    }

    tests! {
        at_top_level is ERR
        r#"return "wat";"#,
        "[line 1] Error at 'return': Can't return from top-level code."
    }

    tests! {
        in_function is OK
        r#"
        fun f() {
            return "ok";
            print "bad";
        }

        print f();
        "#,
        "ok"
    }

    tests! {
        in_method is OK
        r#"
        class Foo {
            method() {
                return "ok";
                print "bad";
            }
        }

        print Foo().method();
        "#,
        "ok"
    }

    tests! {
        return_null_if_no_value is OK
        r#"
        fun f() {
            return;
            print "bad";
        }

        print f();
        "#,
        "nil"
    }
}
