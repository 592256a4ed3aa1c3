use std::time::Instant;

use clap::{CommandFactory, FromArgMatches};
use rand::Rng;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;
use venue_book::cli::Cli;
use venue_book::engine::Engine;
use venue_book::instrument::index_to_symbol;
use venue_book::observer::CountingObserver;
use venue_book::orders::{Direction, OrderSpec, OrderType};

fn parse_args() -> Cli {
    match Cli::command().try_get_matches() {
        Ok(matches) => Cli::from_arg_matches(&matches).expect("clap derive parse cannot fail once matches exist"),
        Err(err) => {
            // clap prints help/usage/errors to stdout or stderr on its own;
            // we only need to pick the exit code.
            let _ = err.print();
            std::process::exit(1);
        }
    }
}

struct SyntheticOrder {
    symbol_index: u32,
    direction: Direction,
    order_type: OrderType,
    price: u64,
    quantity: u64,
}

fn generate_workload(rng: &mut impl Rng, count: u32, instrument_count: u32) -> Vec<SyntheticOrder> {
    (0..count)
        .map(|_| {
            let direction = if rng.random_bool(0.5) {
                Direction::Call
            } else {
                Direction::Put
            };
            let order_type = if rng.random_bool(0.5) {
                OrderType::Market
            } else {
                OrderType::Limit
            };
            let price = if order_type == OrderType::Limit {
                rng.random_range(1000..=1060)
            } else {
                0
            };
            let quantity = rng.random_range(1..=1000);
            let symbol_index = rng.random_range(0..instrument_count);
            SyntheticOrder {
                symbol_index,
                direction,
                order_type,
                price,
                quantity,
            }
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = parse_args();
    let mut rng = rand::rng();

    tracing::info!(
        instruments = cli.instruments,
        limits = cli.limits,
        orders = cli.orders,
        "building engine"
    );
    let mut engine = Engine::with_instruments(
        CountingObserver::new(),
        cli.instruments,
        cli.limits,
        &mut rng,
    );

    let workload = generate_workload(&mut rng, cli.orders, cli.instruments);

    let start = Instant::now();
    for synthetic in &workload {
        let symbol = index_to_symbol(synthetic.symbol_index);
        let spec = OrderSpec {
            direction: synthetic.direction,
            order_type: synthetic.order_type,
            price: synthetic.price,
            quantity: synthetic.quantity,
        };
        engine
            .submit(&symbol, spec)
            .expect("synthetic workload only submits to registered instruments with valid specs");
    }
    let elapsed = start.elapsed();

    let observer = engine.observer();
    let ns_per_trade = if cli.orders == 0 {
        0
    } else {
        elapsed.as_nanos() / u128::from(cli.orders)
    };
    println!(
        "Summary -> Submits: {} Trades: {} Cancels: {} ns/trade: {}",
        observer.submits, observer.trades, observer.cancels, ns_per_trade
    );
    Ok(())
}
