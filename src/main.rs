use std::io;
use std::{env, process};

use rocks_lang::Driver;

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut stdout = io::stdout();
    let mut driver = Driver::new(&mut stdout);

    match args.len() {
        1 => driver.run_prompt(),
        2 => driver.run_file(&args[1]),
        _ => {
            println!("Usage: rocks [script]");
            process::exit(64);
        }
    }
}
