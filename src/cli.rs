use clap::Parser;

/// Benchmark harness for the order book engine: builds a multi-instrument
/// engine, pre-populates each book, then submits a synthetic workload and
/// reports throughput.
#[derive(Parser, Debug)]
#[command(name = "venue-bench")]
#[command(author, version, about = "Order book engine benchmark harness")]
pub struct Cli {
    /// Number of orders to submit during the timed run.
    #[arg(short = 'o', long = "orders", default_value_t = 100_000)]
    pub orders: u32,

    /// Number of instruments to create.
    #[arg(short = 'i', long = "instruments", default_value_t = 10_000)]
    pub instruments: u32,

    /// Number of resting limit orders to pre-populate per instrument, split
    /// evenly between the two sides.
    #[arg(short = 'l', long = "limits", default_value_t = 10)]
    pub limits: u32,
}
