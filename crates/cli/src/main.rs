use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::RestaurantTable;
use query::TimeOfDay;
use server::{Clock, FixedClock, QueryExecutor, RecommendationHandler, Response, SystemClock, TableStore};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// open-now - find a restaurant of a given style that is open right now
#[derive(Parser)]
#[command(name = "open-now")]
#[command(about = "Recommend an open restaurant by cuisine style", long_about = None)]
struct Cli {
    /// Path to the restaurants data file
    #[arg(short, long, default_value = "data/restaurants.dat")]
    data_file: PathBuf,

    /// Table name reported in logs
    #[arg(long, default_value = "Restaurants")]
    table_name: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend one open restaurant
    Recommend {
        /// Cuisine style (partition key)
        #[arg(long)]
        style: Option<String>,

        /// Only vegetarian-friendly ("true") or not ("false")
        #[arg(long)]
        vegetarian: Option<String>,

        /// Time of day to evaluate instead of the current UTC time (HH:MM)
        #[arg(long)]
        now: Option<TimeOfDay>,

        /// Apply filter terms after retrieval instead of inside the store
        #[arg(long)]
        client_side_filter: bool,
    },

    /// List styles and how many restaurants each has
    Styles,

    /// Run benchmark to test performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "1000")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "10")]
        concurrent: usize,
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

    let start = Instant::now();
    let table = Arc::new(
        RestaurantTable::load_from_file(&cli.data_file)
            .with_context(|| format!("Failed to load {}", cli.data_file.display()))?,
    );
    println!(
        "{} Loaded {} restaurants in {:?}",
        "✓".green(),
        table.len(),
        start.elapsed()
    );

    match cli.command {
        Commands::Recommend {
            style,
            vegetarian,
            now,
            client_side_filter,
        } => handle_recommend(table, &cli.table_name, style, vegetarian, now, client_side_filter)?,
        Commands::Styles => handle_styles(&table),
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(table, &cli.table_name, requests, concurrent).await?,
    }

    Ok(())
}

fn build_handler(
    table: Arc<RestaurantTable>,
    table_name: &str,
    clock: Arc<dyn Clock>,
    client_side_filter: bool,
) -> RecommendationHandler {
    let store = TableStore::new(table_name, table).with_server_side_filter(!client_side_filter);
    RecommendationHandler::new(QueryExecutor::new(Arc::new(store)), clock)
}

/// Handle the 'recommend' command
fn handle_recommend(
    table: Arc<RestaurantTable>,
    table_name: &str,
    style: Option<String>,
    vegetarian: Option<String>,
    now: Option<TimeOfDay>,
    client_side_filter: bool,
) -> Result<()> {
    let clock: Arc<dyn Clock> = match now {
        Some(now) => Arc::new(FixedClock(now)),
        None => Arc::new(SystemClock),
    };
    let handler = build_handler(table, table_name, clock, client_side_filter);

    let mut params = HashMap::new();
    if let Some(style) = style {
        params.insert("style".to_string(), style);
    }
    if let Some(vegetarian) = vegetarian {
        params.insert("vegetarian".to_string(), vegetarian);
    }

    let response = handler.handle(&params);
    print_response(&response);

    match response.status_code {
        200 | 404 => Ok(()),
        status => bail!("request failed with status {}", status),
    }
}

/// Handle the 'styles' command
fn handle_styles(table: &RestaurantTable) {
    println!("{}", "Styles:".bold().blue());
    for (style, count) in table.style_counts() {
        println!("{}{} ({} restaurants)", "• ".green(), style, count);
    }
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    table: Arc<RestaurantTable>,
    table_name: &str,
    requests: usize,
    concurrent: usize,
) -> Result<()> {
    let styles: Vec<String> = table
        .style_counts()
        .into_iter()
        .map(|(style, _)| style.to_string())
        .collect();
    if styles.is_empty() {
        bail!("no restaurants loaded, nothing to benchmark");
    }

    let handler = build_handler(table, table_name, Arc::new(SystemClock), false);
    let concurrent = concurrent.max(1);
    let per_worker = requests.div_ceil(concurrent);

    // Each worker runs its share of lookups on the blocking pool
    let bench_start = Instant::now();
    let mut handles = vec![];
    for worker in 0..concurrent {
        let handler = handler.clone();
        let styles = styles.clone();
        let count = per_worker.min(requests.saturating_sub(worker * per_worker));
        handles.push(tokio::task::spawn_blocking(move || {
            let mut timings = Vec::with_capacity(count);
            for _ in 0..count {
                let style = &styles[rand::random_range(0..styles.len())];
                let params = HashMap::from([("style".to_string(), style.clone())]);
                let start = Instant::now();
                handler.handle(&params);
                timings.push(start.elapsed());
            }
            timings
        }));
    }

    let mut timings: Vec<Duration> = vec![];
    for handle in handles {
        timings.extend(handle.await.context("Benchmark worker panicked")?);
    }
    let total_time = bench_start.elapsed();

    if timings.is_empty() {
        bail!("no requests were made");
    }

    timings.sort();
    let avg_latency = timings.iter().sum::<Duration>() / timings.len() as u32;
    let percentile = |p: f32| timings[((timings.len() as f32 * p) as usize).min(timings.len() - 1)];
    let throughput = timings.len() as f32 / total_time.as_secs_f32();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Requests: {}", timings.len());
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Helper function to print a response with a colored status line
fn print_response(response: &Response) {
    let status = response.status_code.to_string();
    let status = match response.status_code {
        200 => status.green(),
        404 => status.yellow(),
        _ => status.red(),
    };
    println!("{} {}", "Status:".bold(), status);
    println!("{}", response.body_string());
}
