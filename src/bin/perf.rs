use log::{error, info};
use rand::{prelude::random, rngs::SmallRng, Rng, SeedableRng};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use structopt::StructOpt;

use std::time;

use rbset::RedBlackTree;

/// Command line options.
#[derive(Clone, StructOpt)]
pub struct Opt {
    #[structopt(long = "seed")]
    seed: Option<u128>,

    #[structopt(long = "loads", default_value = "1000000")] // default 1M
    loads: usize,

    #[structopt(long = "gets", default_value = "1000000")] // default 1M
    gets: usize,

    // restrict keys to 0..dups, to exercise duplicate keys.
    #[structopt(long = "dups")]
    dups: Option<u64>,

    #[structopt(long = "log-level", default_value = "info")]
    log_level: LevelFilter,
}

fn main() {
    let opts = Opt::from_args();
    TermLogger::init(
        opts.log_level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .ok();

    let seed = opts.seed.unwrap_or_else(random);
    info!("perf seed {}", seed);
    let mut rng = {
        let mut bytes = <SmallRng as SeedableRng>::Seed::default();
        for (i, b) in bytes.as_mut().iter_mut().enumerate() {
            *b = seed.to_le_bytes()[i % 16];
        }
        SmallRng::from_seed(bytes)
    };

    let mut index = RedBlackTree::new();

    // initial load
    let start = time::Instant::now();
    for _i in 0..opts.loads {
        index.insert(gen_key(&mut rng, &opts));
    }
    info!("loaded {} keys in {:?}", opts.loads, start.elapsed());

    let start = time::Instant::now();
    let mut hits = 0;
    for _i in 0..opts.gets {
        if index.contains(&gen_key(&mut rng, &opts)) {
            hits += 1;
        }
    }
    info!("{} gets, {} hits, took {:?}", opts.gets, hits, start.elapsed());

    let start = time::Instant::now();
    let clone = index.clone();
    info!("cloned {} keys in {:?}", clone.len(), start.elapsed());

    let start = time::Instant::now();
    let n = index.iter().count();
    info!("iterated {} keys in {:?}", n, start.elapsed());

    match (index.get_min(), index.get_max()) {
        (Ok(min), Ok(max)) => info!("min {} max {}", min, max),
        (Err(err), _) | (_, Err(err)) => info!("{}", err),
    }

    let start = time::Instant::now();
    match index.validate() {
        Ok(()) => info!("validated in {:?}", start.elapsed()),
        Err(err) => error!("validate failed: {}", err),
    }
}

fn gen_key(rng: &mut SmallRng, opts: &Opt) -> i64 {
    match opts.dups {
        Some(dups) if dups > 0 => (rng.gen::<u64>() % dups) as i64,
        _ => rng.gen::<i64>(),
    }
}
