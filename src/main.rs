use signal_sim::{
    demo_signals, resolve_anchor, LocationProvider, RenderAdapter, SignalRegistry, SignalView,
    TickScheduler,
};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// Prints each snapshot to stdout in place of a map overlay.
struct ConsoleAdapter;

impl RenderAdapter for ConsoleAdapter {
    fn render(&mut self, signals: &[SignalView]) {
        for signal in signals {
            println!(
                "{:<10} {:<6?} {:>3}s{}",
                signal.label,
                signal.phase,
                signal.countdown,
                if signal.pedestrian_walk { "  WALK" } else { "" },
            );
        }
        println!();
    }

    fn clear(&mut self) {
        println!("(signals removed)");
    }
}

/// The demo has no geolocation; the fallback anchor is used.
struct NoLocation;

impl LocationProvider for NoLocation {
    fn anchor(&self) -> Option<signal_sim::LatLng> {
        None
    }
}

fn main() {
    env_logger::init();

    let anchor = resolve_anchor(&NoLocation);
    let mut registry = SignalRegistry::new();
    registry.set_listener(Box::new(ConsoleAdapter));
    let registry = Arc::new(Mutex::new(registry));

    let mut scheduler = TickScheduler::new(Arc::clone(&registry));
    scheduler.install(demo_signals(anchor));

    thread::sleep(Duration::from_secs(30));
    scheduler.shutdown();
}
