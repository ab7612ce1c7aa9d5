use std::io::{stdin, stdout, Write};
use std::path::Path;

use crossterm::style::Stylize;
use roulette_core::import::read_import;
use roulette_core::persistence::{default_data_dir, load_store, save_store, DirStore};
use roulette_core::TermStore;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut kv = DirStore::new(default_data_dir());
    let mut store = load_store(&kv);
    let mut rng = rand::thread_rng();

    println!("Term Roulette. Type 'help' for commands, 'exit' to quit.");
    println!("---------------------------------------------------------");
    render(&store);

    loop {
        print!("\n> ");
        stdout().flush().ok();

        let mut line = String::new();
        if stdin().read_line(&mut line).unwrap_or(0) == 0 {
            break; // EOF
        }
        let line = line.trim();
        let (cmd, rest) = match line.split_once(' ') {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (line, ""),
        };

        match cmd {
            "" => continue,
            "exit" => break,
            "help" => print_help(),
            "pick" => {
                let filter = (!rest.is_empty()).then_some(rest);
                match store.select_random(filter, &mut rng) {
                    Ok(term) => {
                        println!("{} ({})", term.name.as_str().bold(), term.category);
                        save(&store, &mut kv);
                        render(&store);
                    }
                    Err(_) => println!("No available terms to select!"),
                }
            }
            "reset" => {
                store.reset_blacklist();
                save(&store, &mut kv);
                render(&store);
                println!("Blacklist reset. Ready to go!");
            }
            "add" => {
                let (name, category) = match rest.split_once('|') {
                    Some((name, category)) => (name, category),
                    None => (rest, ""),
                };
                match store.add_term(name, category) {
                    Ok(true) => {
                        save(&store, &mut kv);
                        render(&store);
                    }
                    Ok(false) => {} // empty submissions are ignored
                    Err(e) => println!("{e}"),
                }
            }
            "del" => {
                if store.delete_term(rest) {
                    save(&store, &mut kv);
                    render(&store);
                } else {
                    println!("No term named '{rest}'.");
                }
            }
            "mark" => {
                let blacklisted = store.toggle_blacklist(rest);
                save(&store, &mut kv);
                render(&store);
                if blacklisted {
                    println!("'{rest}' blacklisted.");
                } else {
                    println!("'{rest}' available again.");
                }
            }
            "list" => render(&store),
            "import" => match read_import(Path::new(rest)) {
                Ok(value) => match store.import_terms(&value) {
                    Ok(count) => {
                        println!("Imported {count} terms.");
                        save(&store, &mut kv);
                        render(&store);
                    }
                    Err(e) => println!("{e}"),
                },
                Err(e) => println!("Error reading file: {e}"),
            },
            other => println!("Unknown command '{other}'. Type 'help'."),
        }
    }
}

fn save(store: &TermStore, kv: &mut DirStore) {
    if let Err(e) = save_store(store, kv) {
        eprintln!("[ERROR] Could not save: {e}");
    }
}

fn render(store: &TermStore) {
    for (category, terms) in store.group_by_category() {
        println!("{}", category.bold());
        for term in terms {
            if store.is_blacklisted(&term.name) {
                println!("  {}", term.name.as_str().dark_grey());
            } else {
                println!("  {}", term.name);
            }
        }
    }
}

fn print_help() {
    println!("pick [category]      pick a random term and blacklist it");
    println!("reset                clear the blacklist");
    println!("add <name> [| cat]   add a term (category optional)");
    println!("del <name>           delete a term");
    println!("mark <name>          toggle a term's blacklist state");
    println!("list                 show all terms grouped by category");
    println!("import <path>        append terms from a JSON array file");
    println!("exit                 quit");
}
