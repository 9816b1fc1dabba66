use clap::Parser;
use raccoon_raiders::script::replay;
use raccoon_raiders::{Board, BoardOptions, Levels, RACCOON_TURN_FREQUENCY, Script};
use tracing_subscriber::EnvFilter;

struct LevelStats {
    ended: bool,
    score: usize,
}

struct ReplayOpts<'a> {
    level_num: usize,
    script: &'a Script,
    max_ticks: u32,
    print_board: bool,
}

fn replay_level(board: &Board, opts: ReplayOpts) -> LevelStats {
    let mut board = board.clone();
    if opts.print_board {
        println!("\nStarting position:\n{}", board);
    }

    let print_board = opts.print_board;
    let outcome = replay(&mut board, opts.script, opts.max_ticks, |board| {
        if print_board {
            println!("Turn {}:\n{}", board.turns(), board);
        }
    });

    let ended_char = if outcome.ended { 'Y' } else { 'N' };
    let score = outcome
        .score
        .map(|s| s.to_string())
        .unwrap_or_else(|| "-".to_string());
    println!(
        "level: {:<3}  ended: {}  turns: {:<6}  score: {}",
        opts.level_num, ended_char, outcome.turns, score
    );

    LevelStats {
        ended: outcome.ended,
        score: outcome.score.unwrap_or(0),
    }
}

#[derive(Parser)]
#[command(name = "raccoon-raiders")]
#[command(about = "Replays Raccoon Raiders boards with scripted input", long_about = None)]
struct Args {
    /// Path to the levels file (grid format, `;` comments between levels)
    #[arg(value_name = "FILE")]
    levels_file: String,

    /// Level number to replay (1-indexed), or start of range
    #[arg(value_name = "LEVEL")]
    level_start: usize,

    /// Optional end of level range (inclusive, 1-indexed)
    #[arg(value_name = "LEVEL_END")]
    level_end: Option<usize>,

    /// Player input, one symbol per tick: U, D, L, R, or `.` for none
    #[arg(short, long, default_value = "")]
    script: String,

    /// Seed for raccoon movement
    #[arg(long, default_value = "0")]
    seed: u64,

    /// Maximum number of ticks to run per level
    #[arg(short = 'n', long, default_value = "1000")]
    max_ticks: u32,

    /// Raccoons move every this many turns
    #[arg(short, long, default_value_t = RACCOON_TURN_FREQUENCY)]
    frequency: u32,

    /// Print the board after every tick
    #[arg(short, long)]
    print_board: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("raccoon_raiders=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let script: Script = match args.script.parse() {
        Ok(script) => script,
        Err(e) => {
            eprintln!("Error parsing script: {}", e);
            std::process::exit(1);
        }
    };

    let options = BoardOptions {
        raccoon_turn_frequency: args.frequency,
        seed: Some(args.seed),
    };

    // Load levels from file
    let levels = match Levels::from_file_with_options(&args.levels_file, options) {
        Ok(levels) => levels,
        Err(e) => {
            eprintln!("Error loading levels: {}", e);
            std::process::exit(1);
        }
    };

    let level_end = args.level_end.unwrap_or(args.level_start);

    if args.level_start == 0 {
        eprintln!("Error: level numbers must be at least 1");
        std::process::exit(1);
    }

    if level_end < args.level_start {
        eprintln!("Error: level end must be >= level start");
        std::process::exit(1);
    }

    if level_end > levels.len() {
        eprintln!(
            "Error: level {} not found (file contains {} levels)",
            level_end,
            levels.len()
        );
        std::process::exit(1);
    }

    let num_levels = level_end - args.level_start + 1;
    let mut total_ended = 0;
    let mut total_score = 0;

    for level_num in args.level_start..=level_end {
        let Some(board) = levels.get(level_num - 1) else {
            unreachable!("level range was validated");
        };
        let opts = ReplayOpts {
            level_num,
            script: &script,
            max_ticks: args.max_ticks,
            print_board: args.print_board,
        };
        let stats = replay_level(board, opts);

        if stats.ended {
            total_ended += 1;
        }
        total_score += stats.score;
    }

    if num_levels > 1 {
        println!("---");
        println!(
            "ended: {:>3}/{:<3}  total score: {}",
            total_ended, num_levels, total_score
        );
    }
}
