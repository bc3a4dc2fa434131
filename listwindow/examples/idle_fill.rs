// Example: driving the batching timer until the window covers every item.
use listwindow::{ListOptions, ScrollTelemetry, VirtualizedList, WindowConfig};

fn main() {
    let config = WindowConfig::default()
        .with_initial_num_to_render(5)
        .with_max_to_render_per_batch(8)
        .with_update_cells_batching_period_ms(50);
    let mut list = VirtualizedList::new(ListOptions::new(60).with_config(config));

    // A host would arm a timer for `next_deadline` and call `tick` when it fires.
    let mut now_ms = 0u64;
    list.mount(now_ms);
    let telemetry = ScrollTelemetry::vertical(0.0, 300.0, list.content_length());
    let _ = list.on_scroll(&telemetry, now_ms);

    while let Some(deadline) = list.next_deadline() {
        now_ms = deadline;
        let update = list.tick(now_ms);
        if update.needs_render() {
            println!(
                "t={now_ms} scrolling={} window={:?}",
                list.is_scrolling(),
                list.window()
            );
        }
    }
    println!("settled at t={now_ms} window={:?}", list.window());
}
