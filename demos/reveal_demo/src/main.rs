use std::thread;
use std::time::Duration;

use sidereveal_core::*;
use sidereveal_ui::*;

const FRAME: Duration = Duration::from_millis(16);

fn side_content() -> View {
    let row = |tag: &str| {
        Box(Modifier::new()
            .height(44.0)
            .fill_max_width()
            .background(Color::from_hex("#FFFFFF40"))
            .tag(tag))
    };
    Column(
        Modifier::new()
            .width(300.0)
            .padding_values(PaddingValues {
                left: 16.0,
                right: 16.0,
                top: 50.0,
                bottom: 50.0,
            })
            .background(Color::from_hex("#1E1E1ECC"))
            .tag("side"),
    )
    .child((row("one"), row("two"), row("three")))
}

fn main_content() -> View {
    Column(
        Modifier::new()
            .fill_max_size()
            .padding(16.0)
            .background(Color::GREEN),
    )
    .child(Box(Modifier::new().size(44.0, 44.0).background(Color::WHITE)))
}

fn config_from_env() -> anyhow::Result<SideRevealConfig> {
    let mut config = SideRevealConfig::default();
    if let Ok(d) = std::env::var("SIDEREVEAL_DIRECTION") {
        config = config.with_direction(d.parse()?);
    }
    if let Ok(a) = std::env::var("SIDEREVEAL_ANIMATION") {
        config = config.with_animation(a.parse()?);
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let config = config_from_env()?;
    log::info!("Starting side reveal demo ({})", config.reveal_direction);

    let ui = thread::current();
    dispatch::set_waker(move || ui.unpark());

    let (tx, rx) = ui_channel::<bool>();
    let reveal = SideReveal::new(side_content(), main_content(), config, rx);

    let toggler = thread::spawn(move || {
        let mut revealed = false;
        for _ in 0..5 {
            thread::sleep(Duration::from_secs(1));
            revealed = !revealed;
            if tx.send(revealed).is_err() {
                break;
            }
        }
    });

    let mut sched = Scheduler::with_size((1024, 768));
    let mut last = f32::NAN;
    loop {
        let frame = sched.frame(|_| reveal.compose(), layout_and_paint)?;
        let offset = reveal.current_offset();
        if last.is_nan() || (offset - last).abs() >= 1.0 {
            log::info!(
                "frame {}: revealed = {}, offset = {offset:.1}, side at {:?}",
                sched.frame_no,
                reveal.is_revealed(),
                frame.node("side").map(|n| n.rect.x),
            );
            last = offset;
        }

        if reveal.needs_frame() {
            thread::sleep(FRAME);
        } else if toggler.is_finished() {
            break;
        } else {
            thread::park_timeout(Duration::from_millis(250));
        }
    }

    dispatch::clear_waker();
    if toggler.join().is_err() {
        log::warn!("toggle thread panicked");
    }
    sched.shutdown();
    log::info!("done after {} frame(s)", sched.frame_no);
    Ok(())
}
