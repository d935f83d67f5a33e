#[macro_use]
mod common;

#[cfg(test)]
mod assignment {
    tests! {
        associativity is OK
        r#"
        var a = "a";
        var b = "b";
        var c = "c";

        a = b = c;
        print a;
        print b;
        print c;
        "#,
        "c", "c", "c"
    }

    tests! {
        global is OK
        r#"
        var a = "before";
        print a;
        a = "after";
        print a;
        var b = a = "arg";
        print a;
        print b;
        "#,
        "before", "after", "arg", "arg"
    }

    tests! {
        grouping is ERR
        r#"
        var a = "a";
        (a) = "value";
        "#,
        "[line 3] Error at '=': Invalid assignment target."
    }

    tests! {
        infix_operator is ERR
        r#"
        var a = "a";
        var b = "b";
        a + b = "value";
        "#,
        "[line 4] Error at '=': Invalid assignment target."
    }

    tests! {
        local is OK
        r#"
        {
            var a = "before";
            print a;
            a = "after";
            print a;
            var b = a = "arg";
            print a;
            print b;
        }
        "#,
        "before", "after", "arg", "arg"
    }

    tests! {
        prefix_operator is ERR
        r#"
        var a = "a";
        !a = "value";
        "#,
        "[line 3] Error at '=': Invalid assignment target."
    }

    tests! {
        syntax is OK
        r#"
        var a = "before";
        var c = a = "var";
        print a;
        print c;
        "#,
        "var", "var"
    }

    tests! {
        to_this is ERR
        r#"
        class Foo {
            method() {
                this = "value";
            }
        }
        "#,
        "[line 4] Error at '=': Invalid assignment target."
    }

    tests! {
        undefined is ERR
        r#"unknown = "what";"#,
        "Undefined variable 'unknown'.",
        "[line 1]"
    }
}
