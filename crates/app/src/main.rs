use std::fmt;
use std::sync::Arc;

use prep_core::Clock;
use prep_core::model::{NoteId, ProgressUpdate};
use services::AppServices;
use storage::JsonFileStore;

#[derive(Debug)]
enum ArgsError {
    MissingValue { what: &'static str },
    UnknownArg(String),
    InvalidNoteId { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { what } => write!(f, "{what} required"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidNoteId { raw } => write!(f, "invalid note id: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  prepdesk register <email> <password> <name>");
    eprintln!("  prepdesk login <email> <password>");
    eprintln!("  prepdesk logout");
    eprintln!("  prepdesk whoami");
    eprintln!("  prepdesk stats [--mcq <n>] [--typing <n>]");
    eprintln!("  prepdesk note add <title> <content>");
    eprintln!("  prepdesk note list");
    eprintln!("  prepdesk note edit <id> <title> <content>");
    eprintln!("  prepdesk note rm <id>");
    eprintln!("  prepdesk syllabus show");
    eprintln!("  prepdesk syllabus toggle <section> <topic> <item>");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --data <path>   store file (default prepdesk.json)");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  PREPDESK_DATA, RUST_LOG");
}

/// Pulls `--data <path>` out of the argument list, wherever it appears.
fn take_data_path(args: &mut Vec<String>) -> Result<String, ArgsError> {
    let mut path = std::env::var("PREPDESK_DATA")
        .ok()
        .unwrap_or_else(|| "prepdesk.json".to_owned());

    while let Some(pos) = args.iter().position(|a| a == "--data") {
        args.remove(pos);
        if pos >= args.len() {
            return Err(ArgsError::MissingValue { what: "--data value" });
        }
        path = args.remove(pos);
    }
    Ok(path)
}

fn next_arg(args: &mut impl Iterator<Item = String>, what: &'static str) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { what })
}

fn parse_note_id(raw: &str) -> Result<NoteId, ArgsError> {
    raw.parse()
        .map_err(|_| ArgsError::InvalidNoteId { raw: raw.to_owned() })
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    if matches!(argv.first().map(String::as_str), None | Some("--help" | "-h")) {
        print_usage();
        return Ok(());
    }

    let data_path = take_data_path(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let store: Arc<JsonFileStore> = Arc::new(JsonFileStore::open(&data_path)?);
    let services = AppServices::new(store, Clock::default_clock());
    let session = services.session();

    // One restore at startup; commands other than register/login need it.
    session.restore().await;

    let mut args = argv.into_iter();
    let command = next_arg(&mut args, "command")?;

    match command.as_str() {
        "register" => {
            let email = next_arg(&mut args, "email")?;
            let password = next_arg(&mut args, "password")?;
            let name = next_arg(&mut args, "name")?;
            match session.register(&email, &password, &name).await {
                Ok(s) => println!("registered and signed in as {} <{}>", s.name(), s.email()),
                Err(err) => {
                    eprintln!("{err}");
                    std::process::exit(1);
                }
            }
        }
        "login" => {
            let email = next_arg(&mut args, "email")?;
            let password = next_arg(&mut args, "password")?;
            match session.login(&email, &password).await {
                Ok(s) => println!("signed in as {} <{}>", s.name(), s.email()),
                Err(err) => {
                    eprintln!("{err}");
                    std::process::exit(1);
                }
            }
        }
        "logout" => {
            session.logout().await;
            println!("signed out");
        }
        "whoami" => match session.current().await {
            Some(s) => println!("{} <{}>", s.name(), s.email()),
            None => println!("not signed in"),
        },
        "stats" => {
            require_session(&session).await;
            let mut update = ProgressUpdate::new();
            while let Some(flag) = args.next() {
                match flag.as_str() {
                    "--mcq" => {
                        let value = next_arg(&mut args, "--mcq value")?;
                        update.mcq_completed = Some(value.parse()?);
                    }
                    "--typing" => {
                        let value = next_arg(&mut args, "--typing value")?;
                        update.typing_minutes = Some(value.parse()?);
                    }
                    other => return Err(ArgsError::UnknownArg(other.to_owned()).into()),
                }
            }
            if !update.is_empty() {
                services.progress().update(update).await;
            }
            let record = services.progress().read().await;
            println!("mcq completed:      {}", record.mcq_completed);
            println!("typing minutes:     {}", record.typing_minutes);
            println!("subjective answers: {}", record.subjective_answers);
            println!("last active:        {}", record.last_active.to_rfc3339());
        }
        "note" => {
            require_session(&session).await;
            let sub = next_arg(&mut args, "note subcommand")?;
            let notes = services.notes();
            match sub.as_str() {
                "add" => {
                    let title = next_arg(&mut args, "title")?;
                    let content = next_arg(&mut args, "content")?;
                    match notes.create(&title, &content).await {
                        Ok(Some(note)) => println!("created note {}", note.id()),
                        Ok(None) => {}
                        Err(err) => {
                            eprintln!("{err}");
                            std::process::exit(1);
                        }
                    }
                }
                "list" => {
                    let listed = notes.list().await;
                    if listed.is_empty() {
                        println!("no notes yet");
                    }
                    for note in listed {
                        println!(
                            "{}  {}  (updated {})",
                            note.id(),
                            note.title(),
                            note.updated_at().to_rfc3339()
                        );
                    }
                }
                "edit" => {
                    let id = parse_note_id(&next_arg(&mut args, "id")?)?;
                    let title = next_arg(&mut args, "title")?;
                    let content = next_arg(&mut args, "content")?;
                    if let Err(err) = notes.update(id, &title, &content).await {
                        eprintln!("{err}");
                        std::process::exit(1);
                    }
                    println!("updated note {id}");
                }
                "rm" => {
                    let id = parse_note_id(&next_arg(&mut args, "id")?)?;
                    if let Err(err) = notes.delete(id).await {
                        eprintln!("{err}");
                        std::process::exit(1);
                    }
                    println!("deleted note {id}");
                }
                other => return Err(ArgsError::UnknownArg(other.to_owned()).into()),
            }
        }
        "syllabus" => {
            require_session(&session).await;
            let sub = args.next().unwrap_or_else(|| "show".to_owned());
            let syllabus = services.syllabus();
            match sub.as_str() {
                "show" => {
                    for section in syllabus.sections().await {
                        println!(
                            "{} [{}] — {}%",
                            section.title,
                            section.id,
                            section.progress_percent()
                        );
                        for topic in &section.topics {
                            println!("  {} [{}]", topic.title, topic.id);
                            for sub in &topic.subtopics {
                                let mark = if sub.completed { "x" } else { " " };
                                println!("    [{mark}] {} [{}]", sub.title, sub.id);
                            }
                        }
                    }
                }
                "toggle" => {
                    let section = next_arg(&mut args, "section id")?;
                    let topic = next_arg(&mut args, "topic id")?;
                    let item = next_arg(&mut args, "item id")?;
                    if let Err(err) = syllabus.toggle(&section, &topic, &item).await {
                        eprintln!("{err}");
                        std::process::exit(1);
                    }
                    println!("toggled {item}");
                }
                other => return Err(ArgsError::UnknownArg(other.to_owned()).into()),
            }
        }
        other => {
            eprintln!("unknown command: {other}");
            print_usage();
            std::process::exit(2);
        }
    }

    Ok(())
}

async fn require_session(session: &services::SessionManager) {
    if session.current().await.is_none() {
        eprintln!("not signed in (use `prepdesk login` or `prepdesk register`)");
        std::process::exit(1);
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
