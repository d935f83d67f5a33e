use std::path::PathBuf;

/// Writes `source` to a scratch `.rocks` file under the OS temp directory so
/// end-to-end tests can drive `Driver::run_file`/the compiled binary without
/// checking in a separate fixture corpus per test. Each test gets its own
/// file, named after the test function, so parallel test runs don't collide.
pub fn write_fixture(name: &str, source: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("rocks-lang-tests");
    std::fs::create_dir_all(&dir).expect("create scratch fixture directory");
    let path = dir.join(format!("{name}.rocks"));
    std::fs::write(&path, source).expect("write scratch fixture file");
    path
}

/// Each end-to-end test supplies its Lox source inline and either the
/// expected stdout lines (`is OK`) or the expected stderr lines plus a
/// nonzero exit status (`is ERR`), matching the driver's exit-code contract.
#[macro_export]
macro_rules! tests {
    ($name:ident is OK $source:expr $(, $expected:expr)* $(,)?) => {
        #[test]
        fn $name() {
            use rocks_lang::Driver;

            let mut expected = vec![$($expected),*];
            let expected = match expected.len() {
                0 => String::new(),
                _ => {
                    expected.push("");
                    expected.join("\n")
                }
            };

            let path = $crate::common::write_fixture(stringify!($name), $source);

            let mut output = Vec::new();
            let mut driver = Driver::new(&mut output);
            driver.run_file(path.to_str().unwrap());
            drop(driver);

            assert_eq!(expected, std::str::from_utf8(&output).unwrap());
        }
    };

    ($name:ident is ERR $source:expr $(, $expected:expr)+ $(,)?) => {
        #[test]
        fn $name() {
            use assert_cmd::Command;

            let output = vec![$($expected),+].join("\n");
            let path = $crate::common::write_fixture(stringify!($name), $source);

            Command::cargo_bin("rocks").unwrap()
                .arg(path.to_str().unwrap())
                .assert()
                .stderr(format!("{output}\n"))
                .failure();
        }
    };
}
