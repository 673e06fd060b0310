use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use egtdist::prelude::*;
use serde_json::json;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Write the JSON result to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Binomial coefficient C(n, k)
    Binomial { n: u64, k: u64 },

    /// n!
    Factorial { n: u64 },

    /// Probability of drawing a sample composition without replacement
    Hypergeometric {
        /// Per-type sample counts, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        sample: Vec<u64>,

        /// Per-type population counts, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        population: Vec<u64>,
    },

    /// Probability of a per-category outcome count over independent trials
    Multinomial {
        /// Per-category outcome counts, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        counts: Vec<u64>,

        /// Per-category probabilities, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        probabilities: Vec<f64>,
    },

    /// Number of population states for a population split among several types
    States {
        #[arg(long)]
        population: u64,

        #[arg(long)]
        types: usize,

        /// Also list every state
        #[arg(long, default_value_t = false)]
        list: bool,
    },

    /// Play an iterated two-action game between two behaviors
    Play {
        first: Strategy,
        second: Strategy,

        /// Number of rounds to play
        #[arg(short, long, default_value_t = 100)]
        rounds: usize,

        /// Random seed for reproducibility
        #[arg(long, default_value = None)]
        seed: Option<u64>,

        /// Error rate of ImperfectTFT
        #[arg(long, default_value_t = 0.05)]
        error: f64,

        /// Switching probability of ActionInertia
        #[arg(long, default_value_t = 0.1)]
        epsilon: f64,

        /// Opening cooperation probability of ActionInertia
        #[arg(long, default_value_t = 0.5)]
        p: f64,

        /// Payoffs used by GenerousTFT
        #[arg(long, default_value_t = 3.0)]
        reward: f64,
        #[arg(long, default_value_t = 1.0)]
        punishment: f64,
        #[arg(long, default_value_t = 5.0)]
        temptation: f64,
        #[arg(long, default_value_t = 0.0)]
        sucker: f64,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Strategy {
    AllC,
    AllD,
    Random,
    Tft,
    SuspiciousTft,
    GenerousTft,
    GradualTft,
    ImperfectTft,
    Tftt,
    Ttft,
    Grim,
    Pavlov,
    ActionInertia,
}

struct StrategyParams {
    error: f64,
    epsilon: f64,
    p: f64,
    payoffs: [f64; 4],
}

impl Strategy {
    fn build(self, params: &StrategyParams) -> anyhow::Result<Box<dyn Behavior>> {
        let [reward, punishment, temptation, sucker] = params.payoffs;
        let behavior: Box<dyn Behavior> = match self {
            Strategy::AllC => Box::new(Cooperator),
            Strategy::AllD => Box::new(Defector),
            Strategy::Random => Box::new(RandomPlayer),
            Strategy::Tft => Box::new(TitForTat),
            Strategy::SuspiciousTft => Box::new(SuspiciousTitForTat),
            Strategy::GenerousTft => Box::new(GenerousTitForTat::new(
                reward, punishment, temptation, sucker,
            )?),
            Strategy::GradualTft => Box::new(GradualTitForTat::default()),
            Strategy::ImperfectTft => Box::new(ImperfectTitForTat::new(params.error)?),
            Strategy::Tftt => Box::new(TitForTwoTats::default()),
            Strategy::Ttft => Box::new(TwoTitsForTat::default()),
            Strategy::Grim => Box::new(Grim::default()),
            Strategy::Pavlov => Box::new(Pavlov::default()),
            Strategy::ActionInertia => Box::new(ActionInertia::new(params.epsilon, params.p)?),
        };
        Ok(behavior)
    }
}

fn checked_total(counts: &Composition, name: &str) -> anyhow::Result<u64> {
    counts
        .total()
        .ok_or_else(|| anyhow::anyhow!("{name} counts sum past {}", u64::MAX))
}

fn run(command: Command) -> anyhow::Result<serde_json::Value> {
    let result = match command {
        Command::Binomial { n, k } => json!({
            "n": n,
            "k": k,
            "value": binomial_coefficient(n, k).to_string(),
        }),
        Command::Factorial { n } => json!({
            "n": n,
            "value": factorial(n)?.to_string(),
        }),
        Command::Hypergeometric { sample, population } => {
            let sample = Composition::from(sample);
            let population = Composition::from(population);
            let m = checked_total(&population, "population")?;
            let n = checked_total(&sample, "sample")?;
            let probability =
                multivariate_hypergeometric_pdf(m, population.len(), n, &sample, &population)?;
            json!({
                "m": m,
                "n": n,
                "sample": sample,
                "population": population,
                "probability": probability,
            })
        }
        Command::Multinomial {
            counts,
            probabilities,
        } => {
            let counts = Composition::from(counts);
            let n = checked_total(&counts, "counts")?;
            let probability = multinomial_pmf(&counts, n, &probabilities)?;
            json!({
                "n": n,
                "counts": counts,
                "probabilities": probabilities,
                "probability": probability,
            })
        }
        Command::States {
            population,
            types,
            list,
        } => {
            let count = stars_bars(population, types as u64)?.to_string();
            let states: Option<Vec<Composition>> =
                list.then(|| compositions(population, types).collect());
            json!({
                "population": population,
                "types": types,
                "count": count,
                "states": states,
            })
        }
        Command::Play {
            first,
            second,
            rounds,
            seed,
            error,
            epsilon,
            p,
            reward,
            punishment,
            temptation,
            sucker,
        } => {
            let params = StrategyParams {
                error,
                epsilon,
                p,
                payoffs: [reward, punishment, temptation, sucker],
            };
            let mut first = first.build(&params)?;
            let mut second = second.build(&params)?;
            let mut roller = match seed {
                Some(seed) => Roller::from_seed(seed),
                None => Roller::new(),
            };
            let record = play(first.as_mut(), second.as_mut(), rounds, &mut roller);
            let cooperation_rates = [record.cooperation_rate(0), record.cooperation_rate(1)];
            json!({
                "players": record.players,
                "cooperation_rates": cooperation_rates,
                "actions": record.actions,
            })
        }
    };
    Ok(result)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::builder()
        .format_timestamp_secs()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
    log::info!("Arithmetic mode: {}", ACTIVE_MODE);
    log::debug!("Args: {:?}", args);

    let start = chrono::Utc::now();
    let mut result = run(args.command)?;
    let elapsed = chrono::Utc::now() - start;
    result["mode"] = json!(ACTIVE_MODE);
    log::info!("Computed in {} ms", elapsed.num_milliseconds());

    match args.output {
        Some(path) => {
            let file = std::fs::File::create(&path)?;
            let writer = std::io::BufWriter::new(file);
            serde_json::to_writer_pretty(writer, &result)?;
            log::info!("Result written to {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&result)?),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oversized_counts_are_rejected() {
        let result = run(Command::Multinomial {
            counts: vec![u64::MAX, 1],
            probabilities: vec![0.5, 0.5],
        });
        assert!(result.is_err());

        let result = run(Command::States {
            population: u64::MAX,
            types: 2,
            list: false,
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_hypergeometric_command() {
        let result = run(Command::Hypergeometric {
            sample: vec![2, 0],
            population: vec![3, 2],
        })
        .unwrap();
        assert_eq!(result["m"], 5);
        assert_eq!(result["n"], 2);
        assert_eq!(result["sample"], json!([2, 0]));
        let probability = result["probability"].as_f64().unwrap();
        assert!((probability - 0.3).abs() < 1e-15);
    }
}
