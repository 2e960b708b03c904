use crate::Slot;
use crate::gameroom::Strategy;
use crate::table::View;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;

/// CPU participant that presses a random occupied slot.
/// Its claims are mostly wrong, which makes it a good penalty generator.
pub struct Fish(SmallRng);

impl Fish {
    pub fn new(rng: SmallRng) -> Self {
        Self(rng)
    }
}

impl Default for Fish {
    fn default() -> Self {
        Self(SmallRng::from_rng(&mut rand::rng()))
    }
}

#[async_trait::async_trait]
impl Strategy for Fish {
    async fn choose(&mut self, view: &View) -> Vec<Slot> {
        view.cards()
            .choose(&mut self.0)
            .map(|(slot, _)| vec![*slot])
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Card;

    #[tokio::test]
    async fn presses_an_occupied_slot() {
        let view = View::new(vec![(2, Card::from(5u16)), (7, Card::from(1u16))], vec![]);
        let mut fish = Fish::new(SmallRng::seed_from_u64(0));
        for _ in 0..20 {
            let slots = fish.choose(&view).await;
            assert_eq!(slots.len(), 1);
            assert!(slots[0] == 2 || slots[0] == 7);
        }
        assert!(fish.choose(&View::default()).await.is_empty());
    }
}
