//! Headless playback demo: opens an EXR sequence directory, plays it front
//! to back into an in-memory sink, and reports what was presented.
//!
//! Usage: `cargo run --example play_sequence -- <sequence-dir> [fps-override]`

use exrseq::{InMemorySink, SequencePlayer, SequenceSource, shared_sink};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();

    let mut args = std::env::args().skip(1);
    let Some(directory) = args.next() else {
        eprintln!("usage: play_sequence <sequence-dir> [fps-override]");
        std::process::exit(2);
    };
    let fps_override = args.next().and_then(|s| s.parse().ok()).unwrap_or(0.0);

    let source = SequenceSource::new(directory).with_frame_rate_override(fps_override);
    anyhow::ensure!(source.validate(), "'{}' is not a directory", source.sequence_path.display());

    let player = SequencePlayer::default();
    player.on_event(|event| tracing::info!(?event, "media event"));

    anyhow::ensure!(
        player.open(&source.url(), &source),
        "failed to open '{}'",
        source.url()
    );
    print!("{}", player.info());

    let sink = shared_sink(InMemorySink::new());
    player.set_sink(sink.clone());
    player.set_rate(1.0);

    // Drive the engine the way a host render loop would, at 60 ticks per
    // played second.
    let step = 1.0 / 60.0;
    while player.time() < player.duration() {
        player.tick(step);
    }

    let presented = sink.lock().unwrap().present_count();
    println!(
        "presented {presented} frames over {:.3}s of playback",
        player.duration()
    );

    Ok(())
}
