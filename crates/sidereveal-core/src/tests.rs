#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use web_time::Duration;

    use crate::animation::*;
    use crate::dispatch;
    use crate::scope::*;
    use crate::signal::*;
    use crate::*;

    fn recorder<T: 'static>() -> (Rc<RefCell<Vec<T>>>, Sink<T>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink: Sink<T> = {
            let seen = seen.clone();
            Rc::new(move |v| seen.borrow_mut().push(v))
        };
        (seen, sink)
    }

    #[test]
    fn test_signal_basic() {
        let sig = signal(42);
        assert_eq!(sig.get(), 42);

        sig.set(100);
        assert_eq!(sig.get(), 100);

        sig.update(|v| *v += 1);
        assert_eq!(sig.get(), 101);
    }

    #[test]
    fn test_signal_notifies_every_write_in_order() {
        let sig = signal(false);
        let log = Rc::new(RefCell::new(Vec::new()));

        let first = {
            let log = log.clone();
            sig.subscribe(move |v| log.borrow_mut().push(("a", *v)))
        };
        {
            let log = log.clone();
            sig.subscribe(move |v| log.borrow_mut().push(("b", *v)));
        }

        sig.set(true);
        sig.set(true);
        assert_eq!(
            *log.borrow(),
            vec![("a", true), ("b", true), ("a", true), ("b", true)]
        );

        assert!(sig.unsubscribe(first));
        assert!(!sig.unsubscribe(first));
        sig.set(false);
        assert_eq!(log.borrow().last(), Some(&("b", false)));
        assert_eq!(sig.subscriber_count(), 1);
    }

    #[test]
    fn test_subscriber_can_read_signal() {
        let sig = signal(1);
        let read = Rc::new(RefCell::new(0));
        {
            let sig2 = sig.clone();
            let read = read.clone();
            sig.subscribe(move |_| *read.borrow_mut() = sig2.get());
        }
        sig.set(7);
        assert_eq!(*read.borrow(), 7);
    }

    #[test]
    fn test_subscriber_can_unsubscribe_itself() {
        let sig = signal(false);
        let hits = Rc::new(RefCell::new(0));
        let slot: Rc<RefCell<Option<SubId>>> = Rc::new(RefCell::new(None));
        let id = {
            let sig2 = sig.clone();
            let hits = hits.clone();
            let slot = slot.clone();
            sig.subscribe(move |_| {
                *hits.borrow_mut() += 1;
                if let Some(id) = slot.borrow_mut().take() {
                    sig2.unsubscribe(id);
                }
            })
        };
        *slot.borrow_mut() = Some(id);

        sig.set(true);
        sig.set(false);
        assert_eq!(*hits.borrow(), 1);
        assert_eq!(sig.subscriber_count(), 0);
    }

    #[test]
    fn test_subscribe_and_unsubscribe_during_notify() {
        let sig = signal(0);
        let log = Rc::new(RefCell::new(Vec::new()));
        let second: Rc<RefCell<Option<SubId>>> = Rc::new(RefCell::new(None));
        {
            let sig2 = sig.clone();
            let log = log.clone();
            let second = second.clone();
            sig.subscribe(move |v| {
                log.borrow_mut().push(("first", *v));
                // drop the next subscriber and add a late one
                if let Some(id) = second.borrow_mut().take() {
                    sig2.unsubscribe(id);
                    let log = log.clone();
                    sig2.subscribe(move |v| log.borrow_mut().push(("late", *v)));
                }
            });
        }
        let id = {
            let log = log.clone();
            sig.subscribe(move |v| log.borrow_mut().push(("second", *v)))
        };
        *second.borrow_mut() = Some(id);

        sig.set(1);
        assert_eq!(*log.borrow(), vec![("first", 1)]);
        sig.set(2);
        assert_eq!(*log.borrow(), vec![("first", 1), ("first", 2), ("late", 2)]);
    }

    #[test]
    fn test_set_if_changed() {
        let sig = signal(Size::new(10.0, 20.0));
        let hits = Rc::new(RefCell::new(0));
        {
            let hits = hits.clone();
            sig.subscribe(move |_| *hits.borrow_mut() += 1);
        }
        assert!(!sig.set_if_changed(Size::new(10.0, 20.0)));
        assert!(sig.set_if_changed(Size::new(15.0, 20.0)));
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn test_scope_explicit_dispose() {
        let order = Rc::new(RefCell::new(Vec::new()));

        let scope = Scope::new();
        let child = scope.child();
        {
            let order = order.clone();
            scope.add_disposer(move || order.borrow_mut().push("parent"));
        }
        {
            let order = order.clone();
            child.add_disposer(move || order.borrow_mut().push("child"));
        }

        assert!(order.borrow().is_empty());
        scope.dispose();
        scope.dispose();
        assert_eq!(*order.borrow(), vec!["child", "parent"]);
        assert!(scope.is_disposed());

        // late registration runs right away
        let late = Rc::new(RefCell::new(false));
        {
            let late = late.clone();
            scope.add_disposer(move || *late.borrow_mut() = true);
        }
        assert!(*late.borrow());
    }

    #[test]
    fn test_disposed_children_are_forgotten() {
        let parent = Scope::new();
        for _ in 0..1000 {
            parent.child().dispose();
        }
        assert_eq!(parent.child_count(), 0);

        // dropped without an explicit dispose
        for _ in 0..1000 {
            let _ = parent.child();
        }
        assert_eq!(parent.child_count(), 0);

        let live = parent.child();
        let hit = Rc::new(RefCell::new(false));
        {
            let hit = hit.clone();
            live.add_disposer(move || *hit.borrow_mut() = true);
        }
        assert_eq!(parent.child_count(), 1);
        parent.dispose();
        assert!(*hit.borrow());
        assert!(live.is_disposed());
    }

    #[test]
    fn test_just_and_sequence_emit_synchronously() {
        let (seen, sink) = recorder();
        let sub = Just(true).connect(sink.clone());
        assert!(!sub.is_active());
        let _ = sequence([false, true, false]).connect(sink);
        assert_eq!(*seen.borrow(), vec![true, false, true, false]);
    }

    #[test]
    fn test_signal_publisher_replays_then_follows() {
        let source = signal(true);
        let (seen, sink) = recorder();
        let sub = source.clone().connect(sink);
        source.set(false);
        source.set(true);
        assert_eq!(*seen.borrow(), vec![true, false, true]);

        drop(sub);
        source.set(false);
        assert_eq!(seen.borrow().len(), 3);
        assert_eq!(source.subscriber_count(), 0);
    }

    #[test]
    fn test_ui_channel_delivers_on_drain_in_order() {
        let (tx, rx) = ui_channel::<u32>();
        let (seen, sink) = recorder();
        let sub = rx.connect(sink);

        let handle = std::thread::spawn(move || {
            for i in 0..100 {
                tx.send(i).unwrap();
            }
        });
        handle.join().unwrap();

        assert!(seen.borrow().is_empty());
        assert!(dispatch::has_pending());
        assert_eq!(dispatch::drain(), 100);
        assert_eq!(*seen.borrow(), (0..100).collect::<Vec<_>>());
        assert!(!dispatch::has_pending());
        sub.cancel();
    }

    #[test]
    fn test_ui_channel_teardown_discards_and_disconnects() {
        let (tx, rx) = ui_channel::<bool>();
        let (seen, sink) = recorder();
        let sub = rx.connect(sink);

        tx.send(true).unwrap();
        sub.cancel();
        assert_eq!(tx.send(false), Err(DispatchError::Disconnected));
        assert!(!tx.is_connected());

        dispatch::drain();
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_dropped_receiver_disconnects_sender() {
        let (tx, rx) = ui_channel::<bool>();
        drop(rx);
        assert_eq!(tx.send(true), Err(DispatchError::Disconnected));
    }

    #[test]
    fn test_send_wakes_host() {
        let wakes = Arc::new(AtomicUsize::new(0));
        {
            let wakes = wakes.clone();
            dispatch::set_waker(move || {
                wakes.fetch_add(1, Ordering::SeqCst);
            });
        }
        let (tx, rx) = ui_channel::<bool>();
        let _sub = rx.connect(Rc::new(|_| {}));
        tx.send(true).unwrap();
        assert!(wakes.load(Ordering::SeqCst) >= 1);
        dispatch::clear_waker();
        dispatch::drain();
    }

    #[test]
    fn test_scheduler_frame_drains_first() {
        let (tx, rx) = ui_channel::<bool>();
        let state = signal(false);
        let _sub = rx.connect({
            let state = state.clone();
            Rc::new(move |v| state.set(v))
        });
        tx.send(true).unwrap();

        let mut sched = Scheduler::with_size((320, 240));
        let observed = Rc::new(RefCell::new(None));
        let frame = sched
            .frame(
                |_| {
                    *observed.borrow_mut() = Some(state.get());
                    View::new(0, ViewKind::Box)
                },
                |_, _| Ok::<_, std::convert::Infallible>((Scene::default(), vec![])),
            )
            .unwrap();
        assert_eq!(frame.delivered, 1);
        assert_eq!(*observed.borrow(), Some(true));
        assert_eq!(sched.frame_no, 1);
    }

    #[test]
    fn test_color_from_hex() {
        let c = Color::from_hex("#FF5733");
        assert_eq!(c, Color(255, 87, 51, 255));

        let c_alpha = Color::from_hex("#FF5733AA");
        assert_eq!(c_alpha, Color(255, 87, 51, 170));
    }

    #[test]
    fn test_rect_edges() {
        let rect = Rect {
            x: 10.0,
            y: 10.0,
            w: 100.0,
            h: 50.0,
        };

        assert_eq!(rect.right(), 110.0);
        assert!(rect.intersects(&Rect {
            x: 100.0,
            y: 50.0,
            w: 20.0,
            h: 20.0
        }));
        assert!(!rect.intersects(&Rect {
            x: 110.0,
            y: 10.0,
            w: 5.0,
            h: 5.0
        }));
    }

    #[test]
    fn test_size_clamps_negative() {
        assert_eq!(Size::new(-3.0, f32::NAN), Size::ZERO);
    }

    #[test]
    fn test_text_direction_nests() {
        assert_eq!(text_direction(), TextDirection::Ltr);
        with_text_direction(TextDirection::Rtl, || {
            assert_eq!(text_direction(), TextDirection::Rtl);
            with_text_direction(TextDirection::Ltr, || {
                assert_eq!(text_direction(), TextDirection::Ltr);
            });
            assert_eq!(text_direction(), TextDirection::Rtl);
        });
        assert_eq!(text_direction(), TextDirection::Ltr);
    }

    #[test]
    fn test_animation_deterministic() {
        let clock = TestClock::install();

        let mut a = AnimatedValue::new(
            0.0f32,
            AnimationSpec::tween(Duration::from_millis(1000), Easing::Linear),
        );
        a.set_target(10.0);
        clock.advance(Duration::from_millis(250));
        assert!(a.update());
        assert!((*a.get() - 2.5).abs() < 0.01);

        clock.advance(Duration::from_millis(750));
        let cont = a.update();
        assert!(!cont);
        assert!((*a.get() - 10.0).abs() < 0.001);
        reset_clock();
    }

    #[test]
    fn test_retarget_continues_from_current_value() {
        let clock = TestClock::install();
        let mut a = AnimatedValue::new(
            0.0f32,
            AnimationSpec::tween(Duration::from_millis(100), Easing::Linear),
        );
        a.set_target(100.0);
        clock.advance(Duration::from_millis(50));
        a.update();
        assert!((*a.get() - 50.0).abs() < 0.01);

        a.set_target(0.0);
        a.update();
        assert!((*a.get() - 50.0).abs() < 0.01);
        clock.advance(Duration::from_millis(100));
        assert!(!a.update());
        assert_eq!(*a.get(), 0.0);
        reset_clock();
    }

    #[test]
    fn test_zero_duration_jumps() {
        let mut a = AnimatedValue::new(0.0f32, AnimationSpec::none());
        a.set_target(-80.0);
        assert!(!a.is_animating());
        assert_eq!(*a.get(), -80.0);
    }

    #[test]
    fn test_smooth_easing_is_monotonic_and_settles() {
        let e = Easing::Smooth;
        assert_eq!(e.interpolate(0.0), 0.0);
        assert!((e.interpolate(1.0) - 1.0).abs() < 1e-6);
        let mut prev = 0.0;
        for i in 1..=20 {
            let v = e.interpolate(i as f32 / 20.0);
            assert!(v >= prev && v <= 1.0 + 1e-6);
            prev = v;
        }
    }

    #[test]
    fn test_animation_presets_parse() {
        assert_eq!("smooth".parse::<AnimationSpec>(), Ok(AnimationSpec::smooth()));
        assert_eq!(" Fast ".parse::<AnimationSpec>(), Ok(AnimationSpec::fast()));
        assert_eq!(
            "bouncy".parse::<AnimationSpec>(),
            Err(ConfigError::UnknownAnimation("bouncy".into()))
        );
    }
}
