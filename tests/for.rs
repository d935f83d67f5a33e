#[macro_use]
mod common;

#[cfg(test)]
mod _for {
    tests! {
        class_in_body is ERR
        "for (;;) class Foo {}",
        "[line 1] Error at 'class': Expect expression."
    }

    tests! {
        closure_in_body is OK
        r#"
        var f1;
        var f2;
        var f3;

        for (var i = 1; i < 4; i = i + 1) {
            var j = i;
            fun f() {
                print i;
                print j;
            }

            if (j == 1) f1 = f;
            else if (j == 2) f2 = f;
            else f3 = f;
        }

        f1();
        f2();
        f3();
        "#,
        "4", "1", "4", "2", "4", "3"
    }

    tests! {
        fun_in_body is ERR
        "for (;;) fun foo() {}",
        "[line 1] Error at 'fun': Expect expression."
    }

    tests! {
        return_closure is OK
        r#"
        fun f() {
            for (var i = 1; i < 2; i = i + 1) {
                var j = i;
                fun g() {
                    print j;
                }
                return g;
            }
        }

        var h = f();
        h();
        "#,
        "1"
    }

    tests! {
        return_inside is OK
        r#"
        fun f() {
            for (var i = 0; i < 3; i = i + 1) {
                if (i == 1) return i;
            }
        }

        print f();
        "#,
        "1"
    }
}
