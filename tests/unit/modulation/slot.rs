use super::*;

#[test]
fn latest_sample_wins() {
    let slot = SampleSlot::new();
    assert!(slot.latest().is_none());
    slot.publish(1u32);
    slot.publish(2u32);
    assert_eq!(slot.latest().as_deref(), Some(&2));
    slot.clear();
    assert!(slot.latest().is_none());
}

#[test]
fn readers_keep_their_snapshot_across_publishes() {
    let slot = SampleSlot::new();
    slot.publish(vec![1, 2, 3]);
    let held = slot.latest().unwrap();
    slot.publish(vec![9]);
    assert_eq!(*held, vec![1, 2, 3]);
    assert_eq!(*slot.latest().unwrap(), vec![9]);
}

#[test]
fn producer_thread_publishes_whole_samples() {
    let slot = Arc::new(SampleSlot::new());
    let producer = {
        let slot = Arc::clone(&slot);
        std::thread::spawn(move || {
            for n in 1..=200usize {
                slot.publish(vec![n; 64]);
            }
        })
    };
    for _ in 0..200 {
        if let Some(sample) = slot.latest() {
            assert_eq!(sample.len(), 64);
            assert!(sample.iter().all(|v| *v == sample[0]));
        }
    }
    producer.join().unwrap();
    assert_eq!(slot.latest().unwrap()[0], 200);
}
