use mazepath::{app::App, logging};

fn main() -> std::io::Result<()> {
    let _log_guard = logging::init("profile.log");

    let mut args = std::env::args();
    args.next(); // Skip executable name
    let num_iters = args.next().and_then(|s| s.parse::<usize>().ok());
    let seed = args.next().and_then(|s| s.parse::<u64>().ok());

    let app = App::default().with_seed(seed);
    let runs = app.profile(u8::MAX, u8::MAX, num_iters);

    for (i, run) in runs.iter().enumerate() {
        println!(
            "run {}: generation {:?}, dijkstra {:?} ({} expanded), a* {:?} ({} expanded), path {} cells",
            i,
            run.generation,
            run.dijkstra,
            run.dijkstra_expanded,
            run.astar,
            run.astar_expanded,
            run.path_len
        );
    }
    Ok(())
}
