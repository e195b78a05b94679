//! fraudsim-gen: headless synthetic transaction generator.
//!
//! Usage:
//!   fraudsim-gen --seed 12345 --count 1000
//!   fraudsim-gen --config generator.json --count 50 --describe
//!
//! Records go to stdout as JSON lines; the run summary goes to stderr so
//! the output can be piped straight into a file or another tool.

use anyhow::Result;
use fraudsim_core::{
    config::GeneratorConfig,
    distribution::Distribution,
    generator::{RecordSampler, SampledTransaction},
    model::{Currency, Money},
};
use std::collections::BTreeMap;
use std::env;
use std::io::{self, BufWriter, Write};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let config_path = args
        .windows(2)
        .find(|w| w[0] == "--config")
        .map(|w| w[1].as_str());
    let describe = args.iter().any(|a| a == "--describe");

    let mut config = match config_path {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    };
    config.seed = parse_arg(&args, "--seed", config.seed);
    config.record_count = parse_arg(&args, "--count", config.record_count);

    eprintln!("fraudsim-gen");
    eprintln!("  seed:      {}", config.seed);
    eprintln!("  count:     {}", config.record_count);
    eprintln!("  currency:  {} ({})", config.currency, config.currency.name());
    eprintln!("  range:     {} .. {}", config.start_date, config.end_date);
    eprintln!("  config:    {}", config_path.unwrap_or("(defaults)"));
    eprintln!();

    let mut sampler = RecordSampler::from_config(&config)?;
    log::info!("{}", sampler.summary());
    if describe {
        eprintln!("{}", sampler.summary());
        eprintln!();
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut tally = RunTally::new(config.currency);
    for _ in 0..config.record_count {
        let record = sampler.next_record()?;
        writeln!(out, "{}", serde_json::to_string(&record)?)?;
        tally.add(&record)?;
    }
    out.flush()?;

    tally.print();
    Ok(())
}

/// Running counts for the stderr summary. Records are folded in as they
/// stream out, so memory stays flat however many are generated.
struct RunTally {
    records: u64,
    total:   Money,
    by_type: BTreeMap<&'static str, u64>,
    by_mcc:  BTreeMap<String, u64>,
}

impl RunTally {
    fn new(currency: Currency) -> Self {
        Self {
            records: 0,
            total:   Money::zero(currency),
            by_type: BTreeMap::new(),
            by_mcc:  BTreeMap::new(),
        }
    }

    fn add(&mut self, record: &SampledTransaction) -> Result<()> {
        self.total = self.total.checked_add(&record.amount)?;
        self.records += 1;
        *self.by_type.entry(record.transaction_type.type_code()).or_default() += 1;
        *self.by_mcc.entry(record.merchant.mcc.clone()).or_default() += 1;
        Ok(())
    }

    fn print(&self) {
        eprintln!("=== RUN SUMMARY ===");
        eprintln!("  records:        {}", self.records);
        eprintln!("  total amount:   {}", self.total.formatted());
        for (code, count) in &self.by_type {
            eprintln!("  type {code:<10} {count}");
        }
        for (mcc, count) in &self.by_mcc {
            eprintln!("  mcc  {mcc:<10} {count}");
        }
    }
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tally_folds_records_without_keeping_them() {
        let config = GeneratorConfig::default();
        let mut sampler = RecordSampler::from_config(&config).unwrap();
        let mut tally = RunTally::new(config.currency);
        let mut expected_total = Money::zero(config.currency);
        for _ in 0..250 {
            let record = sampler.next_record().unwrap();
            expected_total = expected_total.checked_add(&record.amount).unwrap();
            tally.add(&record).unwrap();
        }
        assert_eq!(tally.records, 250);
        assert_eq!(tally.total, expected_total);
        assert_eq!(tally.by_type.values().sum::<u64>(), 250);
        assert_eq!(tally.by_mcc.values().sum::<u64>(), 250);
    }

    #[test]
    fn tally_rejects_foreign_currency() {
        let mut sampler = RecordSampler::from_config(&GeneratorConfig::default()).unwrap();
        let record = sampler.next_record().unwrap();
        let mut tally = RunTally::new(Currency::Eur);
        assert!(tally.add(&record).is_err());
        assert_eq!(tally.records, 0);
    }
}
