//! Commands sent from the main thread to the audio thread via ring buffer.

/// Commands for the audio-thread click mixer.
#[derive(Debug)]
pub enum AudioCommand {
    /// Install `samples` (mono) as the click for `slot`, replacing whatever
    /// the slot held before.
    Load { slot: usize, samples: Vec<f32> },

    /// Start the click in `slot`, audible for at most `max_frames` frames.
    Trigger { slot: usize, max_frames: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use ringbuf::{
        traits::{Consumer, Producer, Split},
        HeapRb,
    };

    #[test]
    fn load_round_trips_through_the_ring() {
        let rb = HeapRb::<AudioCommand>::new(16);
        let (mut prod, mut cons) = rb.split();

        let samples = vec![0.1, -0.2, 0.3];
        prod.try_push(AudioCommand::Load {
            slot: 1,
            samples: samples.clone(),
        })
        .unwrap();

        match cons.try_pop().unwrap() {
            AudioCommand::Load { slot, samples: got } => {
                assert_eq!(slot, 1);
                assert_eq!(got, samples);
            }
            other => panic!("expected Load, got {other:?}"),
        }
    }

    #[test]
    fn trigger_round_trips_through_the_ring() {
        let rb = HeapRb::<AudioCommand>::new(16);
        let (mut prod, mut cons) = rb.split();

        prod.try_push(AudioCommand::Trigger {
            slot: 0,
            max_frames: 220,
        })
        .unwrap();

        match cons.try_pop().unwrap() {
            AudioCommand::Trigger { slot, max_frames } => {
                assert_eq!(slot, 0);
                assert_eq!(max_frames, 220);
            }
            other => panic!("expected Trigger, got {other:?}"),
        }
    }

    #[test]
    fn ordering_is_preserved() {
        let rb = HeapRb::<AudioCommand>::new(16);
        let (mut prod, mut cons) = rb.split();

        prod.try_push(AudioCommand::Load {
            slot: 0,
            samples: vec![1.0],
        })
        .unwrap();
        prod.try_push(AudioCommand::Trigger {
            slot: 0,
            max_frames: 1,
        })
        .unwrap();

        assert!(matches!(cons.try_pop().unwrap(), AudioCommand::Load { .. }));
        assert!(matches!(
            cons.try_pop().unwrap(),
            AudioCommand::Trigger { .. }
        ));
        assert!(cons.try_pop().is_none());
    }
}
