//! Pick a genre, mood and reading level on the command line and print the
//! recommendations as numbered entries.
//!
//! The API key is read from `GEMINI_API_KEY` (or a `.env` file). Run with
//! `--list` to see the genres and moods on offer.

use bookmood::{
    catalog::Moods,
    selection::{Applied, Event},
    Catalog, Client, Config, Level, Session,
};
use clap::Parser;

/// Book recommendations for a genre, mood and reading level.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Genre, for example "Fantasy".
    #[arg(short, long, required_unless_present = "list")]
    genre: Option<String>,
    /// Mood, which must be offered for the genre.
    #[arg(short, long, required_unless_present = "list")]
    mood: Option<String>,
    /// Beginner, Intermediate or Expert.
    #[arg(short, long, required_unless_present = "list")]
    level: Option<Level>,
    /// Print the genres and moods and exit.
    #[arg(long)]
    list: bool,
    /// Print HTML instead of plain text.
    #[cfg(feature = "html")]
    #[arg(long)]
    html: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "log")]
    env_logger::init();

    // Read the command line arguments.
    let args = Args::parse();
    let catalog = Catalog::builtin();

    if args.list {
        for genre in catalog.genres() {
            println!("{}: {}", genre, catalog.moods(genre).join(", "));
        }
        return Ok(());
    }

    // Fail fast if the key is missing.
    let config = Config::from_env()?;
    let client = Client::from_config(config)?;
    let mut session = Session::new(client);

    // `required_unless_present` guarantees these are set without `--list`.
    let (Some(genre), Some(mood), Some(level)) =
        (args.genre, args.mood, args.level)
    else {
        return Err("genre, mood and level are required".into());
    };

    session.dispatch(Event::SetGenre(genre));
    session.set_mood_checked(mood, &catalog)?;
    session.dispatch(Event::SetLevel(level));

    println!("Fetching recommendations...\n");
    match session.recommend().await {
        Some(Applied::Appended(_)) => {}
        Some(Applied::Empty) => println!("No recommendations this time."),
        Some(Applied::Failed(error)) => return Err(error.into()),
        Some(Applied::Stale) | None => {
            return Err("selection changed before the response arrived".into())
        }
    }

    #[cfg(feature = "html")]
    {
        if args.html {
            use bookmood::html::ToHtml;
            println!("{}", session.state().html());
            return Ok(());
        }
    }

    for entry in session.entries() {
        println!("## {}\n", entry);
    }

    Ok(())
}
