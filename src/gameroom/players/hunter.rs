use crate::Slot;
use crate::cards::Validator;
use crate::gameroom::Strategy;
use crate::table::View;
use std::sync::Arc;

/// CPU participant that searches its snapshot for a valid combination and
/// marks it, first withdrawing any markers that are not part of it.
pub struct Hunter(Arc<dyn Validator>);

impl Hunter {
    pub fn new(validator: Arc<dyn Validator>) -> Self {
        Self(validator)
    }
}

#[async_trait::async_trait]
impl Strategy for Hunter {
    async fn choose(&mut self, view: &View) -> Vec<Slot> {
        let target = self
            .0
            .find_sets(&view.hand(), 1)
            .into_iter()
            .next()
            .unwrap_or_default()
            .into_iter()
            .filter_map(|card| view.slot_of(card))
            .collect::<Vec<_>>();
        let stray = view.mine().iter().filter(|s| !target.contains(*s));
        let missing = target.iter().filter(|s| !view.mine().contains(*s));
        stray.chain(missing).copied().collect()
    }
}
