use std::io::Write;

use anyhow::{Context, Result};
use boid_core::{AttractorBindings, Flock, Vec3};
use boid_shared::{AttractionEvent, AttractionEventKind, FlockStats, FrameSnapshot, Handedness};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::scenario::{Action, Scenario};

/// Frames between stats log lines
pub const STATS_INTERVAL: u64 = 60;

/// A flock driven frame by frame from scripted input
pub struct Session {
    flock: Flock,
    bindings: AttractorBindings<Handedness>,
    rng: StdRng,
    frame: u64,
    snapshot_every: Option<u64>,
}

impl Session {
    /// Spawn `count` boids; a `seed` makes the whole run reproducible
    pub fn new(count: usize, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let flock = Flock::with_rng(count, &mut rng);

        Self {
            flock,
            bindings: AttractorBindings::new(),
            rng,
            frame: 0,
            snapshot_every: None,
        }
    }

    /// Write a snapshot after every `interval` frames instead of only the last one
    pub fn with_snapshot_every(mut self, interval: u64) -> Self {
        self.snapshot_every = Some(interval.max(1));
        self
    }

    pub fn flock(&self) -> &Flock {
        &self.flock
    }

    pub fn flock_mut(&mut self) -> &mut Flock {
        &mut self.flock
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn is_engaged(&self, hand: Handedness) -> bool {
        self.bindings.is_engaged(&hand)
    }

    pub fn apply(&mut self, action: &Action) {
        match action {
            Action::Attraction(event) => self.apply_attraction(event),
            Action::Settings(update) => {
                log::info!("Frame {}: applying settings", self.frame);
                update.apply(&mut self.flock);
            }
            Action::Reset { count } => {
                log::info!("Frame {}: resetting flock to {} boids", self.frame, count);
                self.flock.remove_all();
                self.flock.add_boids_with_rng(*count, &mut self.rng);
            }
        }
    }

    fn apply_attraction(&mut self, event: &AttractionEvent) {
        let hand = event.source;
        match event.kind {
            AttractionEventKind::Start { position } => {
                let handle = self
                    .bindings
                    .engage(&mut self.flock, hand, Vec3::from(position));
                log::debug!("{:?} hand engaged {:?}", hand, handle);
            }
            AttractionEventKind::Move { position } => {
                if !self
                    .bindings
                    .track(&mut self.flock, &hand, Vec3::from(position))
                {
                    log::debug!("Ignoring move from idle {:?} hand", hand);
                }
            }
            AttractionEventKind::End => {
                if !self.bindings.release(&mut self.flock, &hand) {
                    log::debug!("Ignoring end from idle {:?} hand", hand);
                }
            }
        }
    }

    /// Run a single frame
    pub fn step(&mut self) {
        self.flock.update();
        self.frame += 1;
    }

    pub fn stats(&self) -> FlockStats {
        FlockStats::from_flock(&self.flock)
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot::capture(self.frame, &self.flock)
    }

    /// Advance `frames` frames, applying scenario steps as their frame comes up.
    ///
    /// Steps scheduled before the session's current frame belong to an earlier
    /// run and are skipped. Snapshots go to `sink` as JSON lines; the final
    /// frame is always written.
    pub fn run<W: Write>(
        &mut self,
        scenario: &Scenario,
        frames: u64,
        sink: &mut W,
    ) -> Result<FlockStats> {
        let start = self.frame;
        let end = start + frames;
        let mut steps = scenario
            .steps()
            .iter()
            .skip_while(|step| step.frame < start)
            .peekable();

        while self.frame < end {
            while let Some(step) = steps.next_if(|step| step.frame <= self.frame) {
                self.apply(&step.action);
            }

            self.step();

            if self.frame % STATS_INTERVAL == 0 {
                let stats = self.stats();
                log::info!(
                    "Frame {}: {} boids, {} attracted, mean speed {:.4}, max speed {:.4}",
                    self.frame,
                    stats.boid_count,
                    stats.attracted,
                    stats.mean_speed,
                    stats.max_speed
                );
            }

            let due = matches!(self.snapshot_every, Some(every) if self.frame % every == 0);
            if due || self.frame == end {
                self.write_snapshot(sink)?;
            }
        }

        let pending = steps.count();
        if pending > 0 {
            log::info!("{} scenario steps remain after frame {}", pending, end);
        }

        sink.flush().context("Failed to flush snapshots")?;
        Ok(self.stats())
    }

    fn write_snapshot<W: Write>(&self, sink: &mut W) -> Result<()> {
        serde_json::to_writer(&mut *sink, &self.snapshot())
            .with_context(|| format!("Failed to write snapshot for frame {}", self.frame))?;
        writeln!(sink).context("Failed to write snapshot")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boid_shared::Position;

    fn attraction(source: Handedness, kind: AttractionEventKind) -> Action {
        Action::Attraction(AttractionEvent {
            source,
            timestamp_ms: 0,
            kind,
        })
    }

    #[test]
    fn test_seeded_sessions_match() {
        let mut a = Session::new(20, Some(42));
        let mut b = Session::new(20, Some(42));
        for _ in 0..30 {
            a.step();
            b.step();
        }

        let positions = |session: &Session| -> Vec<Vec3> {
            session.flock().boids().iter().map(|boid| boid.position).collect()
        };
        assert_eq!(positions(&a), positions(&b));
        assert_eq!(a.frame(), 30);
    }

    #[test]
    fn test_hand_lifecycle() {
        let mut session = Session::new(5, Some(1));
        let start = Position::new(0.0, 2.0, 0.0);

        session.apply(&attraction(Handedness::Left, AttractionEventKind::Start { position: start }));
        assert!(session.is_engaged(Handedness::Left));
        assert_eq!(session.flock().attraction_points().len(), 1);

        session.apply(&attraction(
            Handedness::Left,
            AttractionEventKind::Move {
                position: Position::new(1.0, 2.0, 0.0),
            },
        ));
        let points: Vec<_> = session.flock().attraction_points().iter().collect();
        assert_eq!(points, vec![Vec3::new(1.0, 2.0, 0.0)]);

        // Moves from a hand that never started are dropped
        session.apply(&attraction(
            Handedness::Right,
            AttractionEventKind::Move { position: start },
        ));
        assert_eq!(session.flock().attraction_points().len(), 1);

        session.apply(&attraction(Handedness::Left, AttractionEventKind::End));
        assert!(!session.is_engaged(Handedness::Left));
        assert!(session.flock().attraction_points().is_empty());
    }

    #[test]
    fn test_reset_keeps_attraction_points() {
        let mut session = Session::new(5, Some(3));
        session.apply(&attraction(
            Handedness::Right,
            AttractionEventKind::Start {
                position: Position::new(0.0, 1.0, 0.0),
            },
        ));
        session.apply(&Action::Reset { count: 9 });

        assert_eq!(session.flock().len(), 9);
        assert_eq!(session.flock().attraction_points().len(), 1);
    }

    #[test]
    fn test_run_writes_final_snapshot() {
        let mut session = Session::new(4, Some(9));
        let mut sink = Vec::new();

        let stats = session.run(&Scenario::default(), 10, &mut sink).unwrap();
        assert_eq!(stats.boid_count, 4);

        let output = String::from_utf8(sink).unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 1);

        let snapshot: FrameSnapshot = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(snapshot.frame, 10);
        assert_eq!(snapshot.boids.len(), 4);
    }

    #[test]
    fn test_run_snapshot_interval() {
        let mut session = Session::new(2, Some(9)).with_snapshot_every(4);
        let mut sink = Vec::new();

        session.run(&Scenario::default(), 10, &mut sink).unwrap();

        let frames: Vec<u64> = String::from_utf8(sink)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str::<FrameSnapshot>(line).unwrap().frame)
            .collect();
        assert_eq!(frames, vec![4, 8, 10]);
    }
}
