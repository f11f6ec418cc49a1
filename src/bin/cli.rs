//! bookcat CLI Client
//!
//! Command-line interface for the book catalog. Runs an interactive menu
//! unless a single command is given.

use std::io::{self, BufRead, Write};
use std::process::exit;

use bookcat::client::validate_field;
use bookcat::protocol::Response;
use bookcat::{CatalogClient, Result};
use clap::{Parser, Subcommand};

/// bookcat CLI
#[derive(Parser, Debug)]
#[command(name = "bookcat-cli")]
#[command(about = "CLI for the bookcat catalog server")]
struct Args {
    /// Server host name or address
    host: String,

    /// Server port
    port: u16,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Submit a book
    Submit {
        title: String,
        author: String,
        location: String,
    },

    /// Locations of a book by title and author
    Locate { title: String, author: String },

    /// All books by an author
    ByAuthor { author: String },

    /// All books with a title
    ByTitle { title: String },

    /// Remove a book
    Remove {
        title: String,
        author: String,
        location: String,
    },
}

fn main() {
    let args = Args::parse();

    let mut client = match CatalogClient::connect((args.host.as_str(), args.port)) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("usage: could not reach {}:{}: {}", args.host, args.port, e);
            exit(1);
        }
    };

    let result = match args.command {
        Some(command) => run_command(&mut client, command).map(|response| print_response(&response)),
        None => run_menu(&mut client),
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        exit(1);
    }
}

fn run_command(client: &mut CatalogClient, command: Commands) -> Result<Response> {
    match command {
        Commands::Submit {
            title,
            author,
            location,
        } => client.submit(&title, &author, &location),
        Commands::Locate { title, author } => client.get_by_title_and_author(&title, &author),
        Commands::ByAuthor { author } => client.get_by_author(&author),
        Commands::ByTitle { title } => client.get_by_title(&title),
        Commands::Remove {
            title,
            author,
            location,
        } => client.remove(&title, &author, &location),
    }
}

// =============================================================================
// Interactive menu
// =============================================================================

const MENU: &str = "\
Please select one of the below menu options.
1: SUBMIT a Book to the Book Catalog.
2: GET locations of a specific Book from the Book Catalog.
3: GET all Books by an author from the Book Catalog.
4: GET all Books with a given title from the Book Catalog.
5: REMOVE a Book from the Book Catalog.
6: EXIT the program.
";

fn run_menu(client: &mut CatalogClient) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        println!("{}", MENU);
        let Some(choice) = prompt(&mut input, ">: ")? else {
            return Ok(());
        };

        let command = match choice.trim() {
            "1" => read_triple(&mut input)?.map(|(title, author, location)| Commands::Submit {
                title,
                author,
                location,
            }),
            "2" => read_fields(&mut input, &["title", "author"])?.map(|mut v| Commands::Locate {
                author: v.remove(1),
                title: v.remove(0),
            }),
            "3" => read_fields(&mut input, &["author"])?.map(|mut v| Commands::ByAuthor {
                author: v.remove(0),
            }),
            "4" => read_fields(&mut input, &["title"])?.map(|mut v| Commands::ByTitle {
                title: v.remove(0),
            }),
            "5" => read_triple(&mut input)?.map(|(title, author, location)| Commands::Remove {
                title,
                author,
                location,
            }),
            "6" => {
                println!("Goodbye!");
                return Ok(());
            }
            _ => {
                eprintln!("usage: Invalid menu option. Please try again.\n");
                continue;
            }
        };

        if let Some(command) = command {
            let response = run_command(client, command)?;
            print_response(&response);
        }
    }
}

fn read_triple(input: &mut impl BufRead) -> Result<Option<(String, String, String)>> {
    Ok(read_fields(input, &["title", "author", "location"])?.map(|mut v| {
        let location = v.remove(2);
        let author = v.remove(1);
        let title = v.remove(0);
        (title, author, location)
    }))
}

/// Prompt for each named field. `None` if any entry fails validation.
fn read_fields(input: &mut impl BufRead, names: &[&'static str]) -> Result<Option<Vec<String>>> {
    let mut values = Vec::with_capacity(names.len());
    for &name in names {
        let question = format!("Please enter the {} of the Book. Max 100 Characters.\n", name);
        let Some(value) = prompt(input, &question)? else {
            return Ok(None);
        };
        if let Err(e) = validate_field(name, &value) {
            eprintln!("usage: {}. Please try again.\n", e);
            return Ok(None);
        }
        values.push(value);
    }
    Ok(Some(values))
}

/// Print `question` and read one line; `None` at end of input
fn prompt(input: &mut impl BufRead, question: &str) -> Result<Option<String>> {
    print!("{}", question);
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let trimmed = line.trim_end_matches(&['\r', '\n'][..]).to_string();
    println!();
    Ok(Some(trimmed))
}

fn print_response(response: &Response) {
    println!("{}", response.status);
    for block in &response.blocks {
        for field in block {
            println!("  {}: {}", field.key, field.value);
        }
        println!();
    }
}
