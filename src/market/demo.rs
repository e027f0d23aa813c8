use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::Instrument;

const DEMO_TICKERS: [(&str, &str, f64); 24] = [
    ("BTC", "Bitcoin", 67_250.0),
    ("ETH", "Ethereum", 3_480.0),
    ("SOL", "Solana", 162.4),
    ("BNB", "BNB", 585.1),
    ("XRP", "XRP", 0.52),
    ("ADA", "Cardano", 0.45),
    ("DOGE", "Dogecoin", 0.16),
    ("AVAX", "Avalanche", 36.2),
    ("DOT", "Polkadot", 7.1),
    ("LINK", "Chainlink", 17.8),
    ("MATIC", "Polygon", 0.71),
    ("LTC", "Litecoin", 84.3),
    ("ATOM", "Cosmos", 8.9),
    ("UNI", "Uniswap", 9.7),
    ("XLM", "Stellar", 0.11),
    ("NEAR", "NEAR Protocol", 6.8),
    ("APT", "Aptos", 9.2),
    ("ARB", "Arbitrum", 1.05),
    ("OP", "Optimism", 2.4),
    ("FIL", "Filecoin", 5.9),
    ("AAVE", "Aave", 92.0),
    ("INJ", "Injective", 27.5),
    ("TIA", "Celestia", 10.3),
    ("SUI", "Sui", 1.02),
];

/// Synthetic quote source used when no snapshot file is given.
pub struct DemoMarket {
    rng: StdRng,
    quotes: Vec<Instrument>,
}

impl DemoMarket {
    pub fn new(seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let quotes = DEMO_TICKERS
            .iter()
            .map(|&(symbol, name, price)| {
                let percent_change = rng.gen_range(-12.0..12.0);
                Instrument::new(symbol, name, price, percent_change)
            })
            .collect();

        Self { rng, quotes }
    }

    pub fn snapshot(&self) -> Vec<Instrument> {
        self.quotes.clone()
    }

    /// Advances every quote by one random-walk step and returns the new snapshot.
    pub fn tick(&mut self) -> Vec<Instrument> {
        for quote in &mut self.quotes {
            let drift: f64 = self.rng.gen_range(-2.5..2.5);
            let previous_close = quote.price / (1.0 + quote.percent_change / 100.0);
            quote.percent_change = (quote.percent_change + drift).clamp(-35.0, 35.0);
            quote.price = (previous_close * (1.0 + quote.percent_change / 100.0)).max(0.0001);
        }

        self.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_markets_are_reproducible() {
        let mut first = DemoMarket::new(Some(7));
        let mut second = DemoMarket::new(Some(7));

        assert_eq!(first.snapshot(), second.snapshot());
        assert_eq!(first.tick(), second.tick());
    }

    #[test]
    fn tick_keeps_quotes_valid_and_bounded() {
        let mut market = DemoMarket::new(Some(42));
        for _ in 0..500 {
            for quote in market.tick() {
                assert!(quote.validate().is_ok());
                assert!(quote.percent_change.abs() <= 35.0);
                assert!(quote.price > 0.0);
            }
        }
    }

    #[test]
    fn symbols_are_unique() {
        let market = DemoMarket::new(Some(1));
        let mut symbols = market
            .snapshot()
            .into_iter()
            .map(|quote| quote.symbol)
            .collect::<Vec<_>>();
        let total = symbols.len();
        symbols.sort();
        symbols.dedup();
        assert_eq!(symbols.len(), total);
    }
}
