use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};

fn level_for(debug_enabled: bool) -> LevelFilter {
    if debug_enabled {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Log to the job console. The runner already timestamps every line.
pub fn init_logging(debug_enabled: bool) {
    let config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .add_filter_allow_str("setup_mariadb")
        .build();

    let _ = TermLogger::init(
        level_for(debug_enabled),
        config,
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );
}
