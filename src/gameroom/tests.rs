use super::*;
use crate::Config;
use crate::Skill;
use crate::cards::Card;
use crate::cards::Deck;
use crate::cards::Shape;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::timeout;

const PATIENCE: Duration = Duration::from_secs(5);

fn config(shape: Shape, set_size: usize, table_size: usize, deck: &[Card]) -> Config {
    Config {
        shape,
        set_size,
        table_size,
        deck_size: deck.len(),
        timer: TimerMode::from_secs(60, 5),
        point_freeze: Duration::from_millis(10),
        penalty_freeze: Duration::from_millis(10),
        humans: 2,
        computers: 0,
        end_pause: Duration::ZERO,
        shuffle: false,
        ..Config::default()
    }
}
fn cards(shape: Shape, features: &[&[usize]]) -> Vec<Card> {
    features
        .iter()
        .map(|f| Card::from_features(shape, f))
        .collect()
}
fn start(config: Config, deck: Vec<Card>) -> (Session, UnboundedReceiver<Event>) {
    let (sink, rx) = ChannelSink::new();
    let session = Game::new(config)
        .with_deck(Deck::from(deck))
        .with_sink(Arc::new(sink))
        .spawn()
        .unwrap();
    (session, rx)
}
async fn await_event<F>(rx: &mut UnboundedReceiver<Event>, f: F) -> Vec<Event>
where
    F: Fn(&Event) -> bool,
{
    let mut seen = Vec::new();
    timeout(PATIENCE, async {
        while let Some(event) = rx.recv().await {
            let done = f(&event);
            seen.push(event);
            if done {
                return;
            }
        }
    })
    .await
    .unwrap();
    seen
}
/// The opening countdown is displayed right after the first deal.
async fn dealt(rx: &mut UnboundedReceiver<Event>) {
    await_event(rx, |e| matches!(e, Event::Countdown { .. })).await;
}
fn drain(rx: &mut UnboundedReceiver<Event>) -> Vec<Event> {
    std::iter::from_fn(|| rx.try_recv().ok()).collect()
}

#[tokio::test]
async fn simultaneous_claims_score_once() {
    let shape = Shape::new(2, 4);
    let set = cards(shape, &[&[0, 0], &[1, 0], &[2, 0], &[3, 0]]);
    let fill = cards(shape, &[&[0, 1], &[0, 2], &[0, 3], &[1, 1]]);
    let deck = set.iter().chain(&fill).copied().collect::<Vec<_>>();
    let (session, mut rx) = start(config(shape, 4, 4, &deck), deck);
    let board = session.board().clone();
    dealt(&mut rx).await;
    for slot in 0..4 {
        for seat in 0..2 {
            session.keypad(seat).unwrap().push(slot).await;
        }
    }
    let outcome = timeout(PATIENCE, session.join()).await.unwrap().unwrap();
    let events = drain(&mut rx);
    let points = events
        .iter()
        .filter(|e| matches!(e, Event::Verdict { verdict: Verdict::Point(_), .. }))
        .count();
    assert_eq!(points, 1);
    assert_eq!(outcome.scores().iter().sum::<u32>(), 1);
    assert_eq!(outcome.winners().len(), 1);
    assert_eq!(board.retired(), set);
    assert_eq!(board.cards(), fill);
    assert!(board.is_consistent());
    assert_eq!(events.last(), Some(&Event::Dispose));
}

#[tokio::test]
async fn losing_claim_is_stale_and_frozen() {
    let shape = Shape::default();
    let first = cards(shape, &[&[0, 0, 0, 0], &[1, 1, 1, 1], &[2, 2, 2, 2]]);
    let second = cards(shape, &[&[0, 1, 2, 0], &[1, 2, 0, 1], &[2, 0, 1, 2]]);
    let deck = first.iter().chain(&second).copied().collect::<Vec<_>>();
    let (session, mut rx) = start(config(shape, 3, 3, &deck), deck);
    let board = session.board().clone();
    dealt(&mut rx).await;
    for seat in 0..2 {
        board.toggle(seat, 0).unwrap();
        board.toggle(seat, 1).unwrap();
    }
    for seat in 0..2 {
        assert!(session.keypad(seat).unwrap().push(2).await);
    }
    let seen = await_event(&mut rx, |e| {
        matches!(e, Event::Verdict { verdict: Verdict::Penalty(_), .. })
    })
    .await;
    let winner = seen
        .iter()
        .find_map(|e| match e {
            Event::Verdict { seat, verdict: Verdict::Point(1) } => Some(*seat),
            _ => None,
        })
        .unwrap();
    let loser = 1 - winner;
    assert_eq!(
        seen.last(),
        Some(&Event::Verdict {
            seat: loser,
            verdict: Verdict::Penalty(Reason::StaleClaim),
        })
    );
    await_event(&mut rx, |e| matches!(e, Event::Freeze { seat, .. } if *seat == loser)).await;
    assert_eq!(board.cards(), second);
    session.stop();
    let outcome = timeout(PATIENCE, session.join()).await.unwrap().unwrap();
    assert_eq!(outcome.winners(), &[winner]);
}

#[tokio::test]
async fn disjoint_claims_both_score() {
    let shape = Shape::default();
    let deck = cards(
        shape,
        &[
            &[0, 0, 0, 0],
            &[1, 1, 1, 1],
            &[2, 2, 2, 2],
            &[0, 1, 2, 0],
            &[1, 2, 0, 1],
            &[2, 0, 1, 2],
        ],
    );
    let (session, mut rx) = start(config(shape, 3, 6, &deck), deck);
    let board = session.board().clone();
    dealt(&mut rx).await;
    for slot in 0..3 {
        assert!(session.keypad(0).unwrap().push(slot).await);
        assert!(session.keypad(1).unwrap().push(slot + 3).await);
    }
    let outcome = timeout(PATIENCE, session.join()).await.unwrap().unwrap();
    assert_eq!(outcome.scores(), &[1, 1]);
    assert_eq!(outcome.winners(), &[0, 1]);
    assert_eq!(board.retired().len(), 6);
    assert!(board.cards().is_empty());
    assert!(board.is_consistent());
}

#[tokio::test]
async fn dead_deck_ends_in_a_tie() {
    let shape = Shape::default();
    let deck = cards(shape, &[&[0, 0, 0, 0], &[1, 0, 0, 0], &[1, 1, 0, 0]]);
    let (session, mut rx) = start(config(shape, 3, 3, &deck), deck);
    let keypad = session.keypad(1).unwrap().clone();
    let outcome = timeout(PATIENCE, session.join()).await.unwrap().unwrap();
    assert_eq!(outcome.winners(), &[0, 1]);
    assert_eq!(outcome.scores(), &[0, 0]);
    assert!(!keypad.press(0));
    let events = drain(&mut rx);
    assert!(events.contains(&Event::Winners(vec![0, 1])));
    assert_eq!(events.last(), Some(&Event::Dispose));
}

#[tokio::test]
async fn stuck_table_is_reshuffled() {
    let shape = Shape::default();
    let stray = cards(shape, &[&[0, 0, 0, 0], &[1, 0, 0, 0], &[1, 1, 0, 0]]);
    let set = cards(shape, &[&[0, 1, 2, 0], &[1, 2, 0, 1], &[2, 0, 1, 2]]);
    let deck = stray.iter().chain(&set).copied().collect::<Vec<_>>();
    let (session, mut rx) = start(config(shape, 3, 3, &deck), deck);
    let seen = await_event(&mut rx, |e| matches!(e, Event::Reshuffle { .. })).await;
    assert_eq!(seen.last(), Some(&Event::Reshuffle { deck: 3 }));
    let next = await_event(&mut rx, |e| matches!(e, Event::Countdown { .. })).await;
    assert!(matches!(next.last(), Some(Event::Countdown { warning: false, .. })));
    assert_eq!(session.board().cards(), set);
    session.stop();
    let outcome = timeout(PATIENCE, session.join()).await.unwrap().unwrap();
    assert_eq!(outcome.winners(), &[0, 1]);
}

#[tokio::test]
async fn stop_interrupts_a_long_freeze() {
    let shape = Shape::default();
    let deck = cards(
        shape,
        &[&[0, 0, 0, 0], &[1, 0, 0, 0], &[1, 1, 0, 0], &[1, 1, 1, 1], &[2, 2, 2, 2]],
    );
    let config = Config {
        penalty_freeze: Duration::from_secs(60),
        end_pause: Duration::from_secs(60),
        ..config(shape, 3, 5, &deck)
    };
    let (session, mut rx) = start(config, deck);
    dealt(&mut rx).await;
    for slot in 0..3 {
        assert!(session.keypad(0).unwrap().push(slot).await);
    }
    let seen = await_event(&mut rx, |e| matches!(e, Event::Verdict { .. })).await;
    assert_eq!(
        seen.last(),
        Some(&Event::Verdict {
            seat: 0,
            verdict: Verdict::Penalty(Reason::InvalidSet),
        })
    );
    assert!(session.board().candidate(0).is_empty());
    session.stop();
    let outcome = timeout(Duration::from_secs(1), session.join())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(outcome.scores(), &[0, 0]);
}

#[tokio::test]
async fn point_clears_rival_markers() {
    let shape = Shape::default();
    let deck = cards(
        shape,
        &[&[0, 0, 0, 0], &[1, 1, 1, 1], &[2, 2, 2, 2], &[0, 1, 2, 0]],
    );
    let (session, mut rx) = start(config(shape, 3, 4, &deck), deck);
    let board = session.board().clone();
    dealt(&mut rx).await;
    board.toggle(1, 0).unwrap();
    board.toggle(1, 1).unwrap();
    board.toggle(1, 0).unwrap();
    assert_eq!(board.candidate(1).len(), 1);
    for slot in 0..3 {
        assert!(session.keypad(0).unwrap().push(slot).await);
    }
    let seen = await_event(&mut rx, |e| matches!(e, Event::Verdict { .. })).await;
    assert_eq!(
        seen.last(),
        Some(&Event::Verdict {
            seat: 0,
            verdict: Verdict::Point(1),
        })
    );
    assert!(board.candidate(1).is_empty());
    session.stop();
    timeout(PATIENCE, session.join()).await.unwrap().unwrap();
}

#[tokio::test]
async fn hunters_play_to_the_end() {
    let shape = Shape::default();
    let config = Config {
        computers: 2,
        humans: 0,
        skill: Skill::Hunter,
        bot_delay: Duration::from_millis(1),
        point_freeze: Duration::from_millis(1),
        penalty_freeze: Duration::from_millis(1),
        end_pause: Duration::ZERO,
        deck_size: 27,
        seed: Some(7),
        ..Config::default()
    };
    let (sink, _rx) = ChannelSink::new();
    let session = Game::new(config).with_sink(Arc::new(sink)).spawn().unwrap();
    let board = session.board().clone();
    let outcome = timeout(Duration::from_secs(30), session.join())
        .await
        .unwrap()
        .unwrap();
    let points = outcome.scores().iter().sum::<u32>() as usize;
    assert!(points > 0);
    assert_eq!(board.retired().len(), points * shape.values());
    assert!(!outcome.winners().is_empty());
    assert!(board.is_consistent());
}

#[test]
fn invalid_config_refuses_to_spawn() {
    let config = Config {
        humans: 0,
        computers: 0,
        ..Config::default()
    };
    assert!(Game::new(config).spawn().is_err());
}
