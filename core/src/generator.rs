//! Composes every sampler into complete transaction records.
//!
//! Each attribute draws from its own RngBank stream, so changing how one
//! attribute is sampled never perturbs the sequence of another. Merchant
//! ids are derived from the merchant stream too: one seed, one record
//! sequence, byte for byte.

use crate::{
    config::GeneratorConfig,
    distribution::{
        DiscreteDistribution, Distribution, TransactionAmountDistribution,
        TransactionTimeDistribution, WeightedEntityDistribution,
    },
    error::DistResult,
    factory,
    model::{CardTransaction, CardType, Merchant, Money, TransactionType},
    rng::{RngBank, StreamSlot},
};
use chrono::NaiveDateTime;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const NAME: &str = "TransactionRecord";

/// One synthetic transaction, ready for an output sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampledTransaction {
    pub reference_id:     String,
    pub timestamp:        NaiveDateTime,
    pub amount:           Money,
    pub transaction_type: TransactionType,
    /// Card attributes are only drawn for card transactions.
    pub card_network:     Option<String>,
    pub card_type:        Option<CardType>,
    pub merchant:         Merchant,
}

#[derive(Debug)]
pub struct RecordSampler {
    amounts:       TransactionAmountDistribution,
    times:         TransactionTimeDistribution,
    types:         DiscreteDistribution<TransactionType>,
    networks:      DiscreteDistribution<String>,
    card_types:    DiscreteDistribution<CardType>,
    merchants:     WeightedEntityDistribution<Merchant>,
    generated:     u64,
}

impl RecordSampler {
    pub fn from_config(config: &GeneratorConfig) -> DistResult<Self> {
        let bank = RngBank::new(config.seed);

        let mut amount_rng = bank.for_stream(StreamSlot::Amount);
        let mut amounts = TransactionAmountDistribution::new(config.currency, amount_rng.fork())?;
        for category in &config.category_amounts {
            let distribution = category.distribution.build(amount_rng.fork())?;
            amounts.set_category_distribution(category.mcc.clone(), distribution);
        }

        let mut times = TransactionTimeDistribution::new(
            config.start_date,
            config.end_date,
            bank.for_stream(StreamSlot::Time),
        )?;
        for profile in &config.hourly_overrides {
            times.set_hourly_weights(profile.day, &profile.weights)?;
        }

        let types = factory::transaction_type_distribution(bank.for_stream(StreamSlot::TransactionType))?;

        let networks = if config.card_networks.is_empty() {
            factory::card_network_distribution(bank.for_stream(StreamSlot::CardNetwork))?
        } else {
            DiscreteDistribution::new(
                "CardNetwork",
                config
                    .card_networks
                    .iter()
                    .map(|entry| (entry.value.clone(), entry.weight)),
                bank.for_stream(StreamSlot::CardNetwork),
            )?
        };

        let card_types = factory::card_type_distribution(bank.for_stream(StreamSlot::CardType))?;

        let mut merchant_rng = bank.for_stream(StreamSlot::Merchant);
        let mut merchant_weights = Vec::with_capacity(config.merchants.len());
        for entry in &config.merchants {
            let id = uuid::Builder::from_random_bytes(merchant_rng.gen()).into_uuid();
            merchant_weights.push((merchant_with_id(id, &entry.name, &entry.mcc), entry.weight));
        }
        let merchants = WeightedEntityDistribution::new(
            "Merchant",
            merchant_weights,
            |m: &Merchant| format!("{} ({})", m.name, m.mcc),
            merchant_rng,
        )?;

        log::debug!(
            "record sampler ready: seed={} {} | {} | {}",
            config.seed,
            amounts.description(),
            times.description(),
            merchants.description()
        );

        Ok(Self {
            amounts,
            times,
            types,
            networks,
            card_types,
            merchants,
            generated: 0,
        })
    }

    pub fn generated(&self) -> u64 {
        self.generated
    }

    pub fn next_record(&mut self) -> DistResult<SampledTransaction> {
        let merchant = self.merchants.sample()?;
        let amount = self.amounts.sample_for(&merchant)?;
        let timestamp = self.times.sample()?;

        let (transaction_type, card_network, card_type) = match self.types.sample()? {
            TransactionType::Card(card) => {
                let network = self.networks.sample()?;
                let card_type = self.card_types.sample()?;
                let card = CardTransaction { network: network.clone(), ..card };
                (TransactionType::Card(card), Some(network), Some(card_type))
            }
            transfer => (transfer, None, None),
        };

        self.generated += 1;
        let record = SampledTransaction {
            reference_id: format!("TX-{:08}", self.generated),
            timestamp,
            amount,
            transaction_type,
            card_network,
            card_type,
            merchant,
        };
        log::trace!(
            "{} {} {} at {}",
            record.reference_id,
            record.timestamp,
            record.amount,
            record.merchant.name
        );
        Ok(record)
    }

    pub fn records(&mut self, count: usize) -> DistResult<Vec<SampledTransaction>> {
        (0..count).map(|_| self.next_record()).collect()
    }
}

impl Distribution<SampledTransaction> for RecordSampler {
    fn sample(&mut self) -> DistResult<SampledTransaction> {
        self.next_record()
    }

    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> String {
        format!(
            "Records from {} to {} across {} merchants",
            self.times.start(),
            self.times.end(),
            self.merchants.len()
        )
    }
}

fn merchant_with_id(id: Uuid, name: &str, mcc: &str) -> Merchant {
    Merchant {
        id,
        name: name.to_string(),
        mcc: mcc.to_string(),
    }
}
