use anyhow::{bail, Context, Result};
use catalog::{Movie, MovieDraft, SortDirection, SortField};
use clap::{Parser, Subcommand};
use colored::Colorize;
use explorer::{ExplorerOrchestrator, JsonCatalogReader};
use history::{FileStore, HistoryStore, DEFAULT_MAX_ENTRIES};
use rand::Rng;
use ranking::{sort_by_rating, top_k_by_rating, RankingConfig, ScoredMovie};
use std::path::{Path, PathBuf};
use std::time::Instant;

type Orchestrator = ExplorerOrchestrator<JsonCatalogReader, FileStore>;

/// Movie Explorer - browse, search and get recommendations from a movie catalog
#[derive(Parser)]
#[command(name = "movie-explorer")]
#[command(about = "Content-based movie recommendations from your watch history", long_about = None)]
struct Cli {
    /// Path to the JSON movie catalog
    #[arg(short, long, default_value = "data/movies.json")]
    catalog: PathBuf,

    /// Directory holding the local watch history
    #[arg(long, default_value = ".movie-explorer")]
    history_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend movies similar to what you watched recently
    Recommend {
        /// Number of recommendations to return
        #[arg(long, default_value = "10")]
        limit: usize,

        /// Number of recent watches used as seeds
        #[arg(long, default_value = "5")]
        history_limit: usize,

        /// Spread recommendations across genres
        #[arg(long)]
        diverse: bool,

        /// Genre cap used with --diverse
        #[arg(long, default_value = "2")]
        max_per_genre: usize,

        /// Show why each movie was recommended
        #[arg(long)]
        explain: bool,
    },

    /// Show the highest-rated movies
    Top {
        /// Number of movies to show
        #[arg(long, default_value = "10")]
        k: usize,
    },

    /// Find movies whose title starts with a prefix
    Search {
        /// Title prefix (case-insensitive)
        prefix: String,
    },

    /// List the catalog sorted by a field, optionally within one genre
    Browse {
        /// Sort field: title, year or rating
        #[arg(long, default_value = "rating")]
        sort: SortField,

        /// Sort direction: asc or desc
        #[arg(long, default_value = "desc")]
        direction: SortDirection,

        /// Only show movies in this genre
        #[arg(long)]
        genre: Option<String>,
    },

    /// Mark a movie as watched
    Watch {
        /// Movie title (case-insensitive exact match)
        title: String,
    },

    /// Show your watch history, newest first
    History {
        /// Number of entries to show
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Forget your watch history
    ClearHistory,

    /// Add a movie to the catalog
    Add {
        #[arg(long)]
        title: String,

        #[arg(long)]
        year: Option<String>,

        /// Rating from 0 to 10 (clamped)
        #[arg(long)]
        rating: Option<String>,

        /// Comma-separated genres
        #[arg(long, default_value = "")]
        genre: String,

        /// Comma-separated tags
        #[arg(long, default_value = "")]
        tags: String,

        /// Explicit id; derived from title and year when omitted
        #[arg(long)]
        id: Option<String>,

        #[arg(long)]
        poster_url: Option<String>,

        #[arg(long)]
        language: Option<String>,
    },

    /// Compare heap top-K against a full sort on a synthetic catalog
    Benchmark {
        /// Number of synthetic movies
        #[arg(long, default_value = "100000")]
        size: usize,

        /// Number of movies to select
        #[arg(long, default_value = "10")]
        k: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend {
            limit,
            history_limit,
            diverse,
            max_per_genre,
            explain,
        } => {
            ensure_catalog(&cli.catalog)?;
            let config = RankingConfig::default()
                .with_history_limit(history_limit)
                .with_max_per_genre(max_per_genre);
            let orchestrator = build_orchestrator(&cli.catalog, &cli.history_dir, config)?;
            handle_recommend(&orchestrator, limit, diverse, explain).await
        }
        Commands::Top { k } => {
            ensure_catalog(&cli.catalog)?;
            let orchestrator = default_orchestrator(&cli)?;
            let movies = orchestrator.top_k(k).await;
            print_movies(&format!("Top {} by rating:", k), &movies);
            Ok(())
        }
        Commands::Search { ref prefix } => {
            ensure_catalog(&cli.catalog)?;
            let orchestrator = default_orchestrator(&cli)?;
            let movies = orchestrator.prefix_search(prefix).await;
            print_movies(&format!("Titles starting with '{}':", prefix), &movies);
            Ok(())
        }
        Commands::Browse {
            sort,
            direction,
            ref genre,
        } => {
            ensure_catalog(&cli.catalog)?;
            let orchestrator = default_orchestrator(&cli)?;
            handle_browse(&orchestrator, sort, direction, genre.as_deref()).await;
            Ok(())
        }
        Commands::Watch { ref title } => {
            ensure_catalog(&cli.catalog)?;
            let mut orchestrator = default_orchestrator(&cli)?;
            match orchestrator.watch(title).await {
                Some(movie) => {
                    println!("{} Watched {}", "✓".green(), format_movie(&movie));
                    Ok(())
                }
                None => bail!("No movie titled '{}' in {}", title, cli.catalog.display()),
            }
        }
        Commands::History { limit } => {
            let orchestrator = default_orchestrator(&cli)?;
            handle_history(&orchestrator, limit);
            Ok(())
        }
        Commands::ClearHistory => {
            let mut orchestrator = default_orchestrator(&cli)?;
            orchestrator.clear_history();
            println!("{} Watch history cleared", "✓".green());
            Ok(())
        }
        Commands::Add {
            ref title,
            ref year,
            ref rating,
            ref genre,
            ref tags,
            ref id,
            ref poster_url,
            ref language,
        } => {
            let orchestrator = default_orchestrator(&cli)?;
            let draft = MovieDraft {
                id: id.clone(),
                title: title.clone(),
                year: year.clone(),
                rating: rating.clone(),
                genre: genre.clone(),
                tags: tags.clone(),
                poster_url: poster_url.clone(),
                language: language.clone(),
            };
            let id = orchestrator.add_movie(draft).await?;
            println!("{} Added '{}' as {}", "✓".green(), title.trim(), id.bold());
            Ok(())
        }
        Commands::Benchmark { size, k } => handle_benchmark(size, k),
    }
}

fn default_orchestrator(cli: &Cli) -> Result<Orchestrator> {
    build_orchestrator(&cli.catalog, &cli.history_dir, RankingConfig::default())
}

fn build_orchestrator(
    catalog: &Path,
    history_dir: &Path,
    config: RankingConfig,
) -> Result<Orchestrator> {
    let history = HistoryStore::new(FileStore::new(history_dir)).with_max_len(DEFAULT_MAX_ENTRIES);
    ExplorerOrchestrator::new(JsonCatalogReader::new(catalog), history, config)
        .context("Failed to set up the movie explorer")
}

/// Read commands fail loudly on a missing catalog instead of printing nothing
fn ensure_catalog(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!(
            "Catalog {} not found (use --catalog or `movie-explorer add` to create it)",
            path.display()
        );
    }
    Ok(())
}

/// Handle the 'recommend' command
async fn handle_recommend(
    orchestrator: &Orchestrator,
    limit: usize,
    diverse: bool,
    explain: bool,
) -> Result<()> {
    let config = orchestrator.config();
    let recommendations = if diverse {
        orchestrator
            .recommend_diverse(limit, config.max_per_genre)
            .await
    } else {
        orchestrator.recommend(limit, config.history_limit).await
    };

    if recommendations.is_empty() {
        if orchestrator.read_history(config.history_limit).is_empty() {
            println!(
                "{}",
                "No watch history yet. Mark something with `movie-explorer watch <title>`.".yellow()
            );
        } else {
            println!("{}", "Nothing to recommend from your recent watches.".yellow());
        }
        return Ok(());
    }

    print_recommendations(&recommendations, explain);
    Ok(())
}

/// Handle the 'browse' command
async fn handle_browse(
    orchestrator: &Orchestrator,
    sort: SortField,
    direction: SortDirection,
    genre: Option<&str>,
) {
    match genre {
        Some(genre) => {
            // Genre filtering comes back in collection order; apply the sort here
            let mut movies = orchestrator.by_genre(genre).await;
            movies.sort_by(|a, b| direction.apply(sort.compare(a, b)));
            print_movies(
                &format!("{} movies by {} ({}):", genre, sort, direction),
                &movies,
            );
        }
        None => {
            let movies = orchestrator.browse(sort, direction).await;
            print_movies(&format!("All movies by {} ({}):", sort, direction), &movies);
        }
    }
}

/// Handle the 'history' command
fn handle_history(orchestrator: &Orchestrator, limit: usize) {
    let entries = orchestrator.history_entries();
    if entries.is_empty() {
        println!("{}", "No watch history.".yellow());
        return;
    }

    println!("{}", "Recently watched:".bold().blue());
    for (i, entry) in entries.iter().take(limit).enumerate() {
        match &entry.id {
            Some(id) => println!(
                "{}. {} {}",
                (i + 1).to_string().green(),
                entry.title,
                format!("[{}]", id).dimmed()
            ),
            None => println!("{}. {}", (i + 1).to_string().green(), entry.title),
        }
    }
}

/// Handle the 'benchmark' command
fn handle_benchmark(size: usize, k: usize) -> Result<()> {
    if size == 0 {
        bail!("--size must be at least 1");
    }

    println!("Generating {} synthetic movies...", size);
    let mut rng = rand::rng();
    let movies: Vec<Movie> = (0..size)
        .map(|i| {
            Movie::new(format!("m{}", i), format!("Movie {}", i))
                .with_rating(rng.random_range(0.0..=10.0))
        })
        .collect();

    let start = Instant::now();
    let heap = top_k_by_rating(&movies, k);
    let heap_time = start.elapsed();

    let start = Instant::now();
    let sorted = sort_by_rating(&movies, k);
    let sort_time = start.elapsed();

    let heap_ids: Vec<&str> = heap.iter().map(|m| m.id.as_str()).collect();
    let sorted_ids: Vec<&str> = sorted.iter().map(|m| m.id.as_str()).collect();
    if heap_ids != sorted_ids {
        bail!("Heap top-K disagrees with the full sort");
    }

    println!("Benchmark results (n = {}, k = {}):", size, k);
    println!("Heap top-K: {:?}", heap_time);
    println!("Full sort:  {:?}", sort_time);
    println!(
        "Speedup:    {:.2}x",
        sort_time.as_secs_f64() / heap_time.as_secs_f64().max(f64::EPSILON)
    );
    println!("{} Results match", "✓".green());
    Ok(())
}

fn format_movie(movie: &Movie) -> String {
    let year = movie
        .year
        .map(|y| y.to_string())
        .unwrap_or_else(|| "????".to_string());
    format!("{} ({})", movie.title.bold(), year)
}

fn print_movies(header: &str, movies: &[Movie]) {
    println!("{}", header.bold().blue());
    if movies.is_empty() {
        println!("  {}", "(none)".dimmed());
        return;
    }
    for (i, movie) in movies.iter().enumerate() {
        println!(
            "{}. {} [{}] - Rating: {:.1}",
            (i + 1).to_string().green(),
            format_movie(movie),
            movie.genre,
            movie.clamped_rating()
        );
    }
}

/// Helper function to format and print recommendations
fn print_recommendations(recommendations: &[ScoredMovie], explain: bool) {
    println!("{}", "Movie Recommendations:".bold().blue());
    for (i, rec) in recommendations.iter().enumerate() {
        println!(
            "{}. {} [{}] - Score: {:.3}",
            (i + 1).to_string().green(),
            format_movie(&rec.movie),
            rec.movie.genre,
            rec.score
        );
        if explain {
            for reason in rec.reasons() {
                println!("   {}", reason.dimmed());
            }
        }
    }
}
