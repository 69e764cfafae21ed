use rstation_core::config::{SchedConfig, UnitClass};
use rstation_core::station::payload::MaskedWrite;
use rstation_core::{ReservationStation, Selector};

pub struct TestContext {
    pub station: ReservationStation,
}

impl TestContext {
    pub fn new(config: SchedConfig) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        Self {
            station: ReservationStation::new(config).unwrap(),
        }
    }

    /// The configuration from the end-to-end scenario: 4 entries, 2 columns,
    /// 64-bit operands, one port of each class.
    pub fn small() -> Self {
        Self::new(small_config())
    }

    pub fn with_unit_class(class: UnitClass) -> Self {
        let config = SchedConfig {
            unit_class: class,
            ..small_config()
        };
        Self::new(config)
    }

    pub fn with_delayed() -> Self {
        let config = SchedConfig {
            delayed_src: true,
            ..small_config()
        };
        Self::new(config)
    }

    pub fn with_mid_state() -> Self {
        let config = SchedConfig {
            has_mid_state: true,
            ..small_config()
        };
        Self::new(config)
    }

    /// One-hot selector sized for this station's array.
    pub fn one_hot(&self, slot: usize) -> Selector {
        Selector::one_hot(self.station.config().num_entries, slot)
    }

    /// Posts a full-mask enqueue write of `values` to `slot` on port 0.
    pub fn enqueue_slot(&mut self, slot: usize, values: &[u64]) {
        let addr = self.one_hot(slot);
        self.station.post_enqueue(
            0,
            MaskedWrite {
                addr,
                mask: vec![true; values.len()],
                data: values.to_vec(),
            },
        );
    }

    /// Reads all columns of a single slot.
    pub fn read_slot(&self, slot: usize) -> Vec<u64> {
        self.station.read(&self.one_hot(slot))
    }
}

pub fn small_config() -> SchedConfig {
    SchedConfig {
        num_entries: 4,
        num_src: 2,
        data_bits: 64,
        num_enq: 1,
        num_deq: 1,
        num_wakeup: 1,
        ..SchedConfig::default()
    }
}
