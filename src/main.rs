// SPDX-License-Identifier: GPL-3.0-or-later

use std::io;

use cadence::engine::Cadence;
use cadence::perft;
use cadence::uci::{self, Session};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("perft") => {
            let depth = match args.get(2) {
                Some(arg) => match arg.parse() {
                    Ok(d) => d,
                    Err(_) => {
                        eprintln!("usage: {} perft [depth]", args[0]);
                        std::process::exit(1);
                    }
                },
                None => 6,
            };
            println!("{}", uci::engine_info(false));
            perft::run(depth);
            Ok(())
        }
        Some(arg) => {
            eprintln!("unknown argument: {}", arg);
            eprintln!("usage: {} [perft [depth]]", args[0]);
            std::process::exit(1);
        }
        None => {
            let stdin = io::stdin();
            let mut session = Session::new(stdin.lock(), io::stdout(), Cadence::new());
            session.run()
        }
    }
}
