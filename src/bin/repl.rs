use rustyline::error::ReadlineError;
use rustyline::Editor;

use stackword::{Env, Flattenable, Mode};

const HISTORY: &str = ".stackword_history";

fn prompt(env: &Env) -> String {
    match env.mode() {
        Mode::Normal => "> ".to_owned(),
        open => format!("{} ... ", open),
    }
}

fn main() {
    env_logger::init();

    let mut rl = Editor::<()>::new();
    let _ = rl.load_history(HISTORY);

    let mut env = Env::new();

    loop {
        match rl.readline(&prompt(&env)) {
            Ok(line) => {
                rl.add_history_entry(line.as_str());

                match line.trim() {
                    ".quit" => break,

                    ".clear" => {
                        env = Env::new();
                        continue;
                    },

                    ".words" => {
                        for (name, body) in env.words() {
                            println!(": {} {} ;", name, body.flatten(" "));
                        }
                        continue;
                    },

                    _ => (),
                }

                match env.eval_line(&line) {
                    Ok(()) if env.mode() == &Mode::Normal => {
                        println!("{}", env);
                    },
                    Ok(()) => continue,
                    Err(err) => println!("{}", err),
                }
            },

            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,

            Err(err) => {
                println!("{}", err);
                break;
            },
        }
    }

    if let Err(err) = rl.save_history(HISTORY) {
        println!("history save failed: {}", err);
    }
}
