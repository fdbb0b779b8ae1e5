use std::error::Error;
use std::process;

use clap::{Parser, ValueEnum};

use unobot::card::{HAND_SIZE, MAX_PLAYERS, MIN_PLAYERS};
use unobot::{
    ColorPolicy, Game, GameBuilder, Strategy, create_bot_from_spec, describe_event,
    label_for_spec, render_state,
};

/// Default base seed for deterministic runs.
const DEFAULT_SEED: u64 = 0xDEC0_1DED_5EED_F00D;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyArg {
    Uniform,
    Hand,
}

impl From<PolicyArg> for ColorPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Uniform => ColorPolicy::Uniform,
            PolicyArg::Hand => ColorPolicy::HandWeighted,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "simulate",
    about = "Play rounds between bots and report per-seat wins and points."
)]
struct Args {
    /// Number of rounds to simulate
    #[arg(short = 'g', long = "games", default_value_t = 100)]
    games: usize,

    /// Base RNG seed (round i uses seed + i)
    #[arg(short = 's', long = "seed", default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Safety cap on turns per round; rounds exceeding this are aborted
    #[arg(long = "max-turns", default_value_t = 2000)]
    max_turns: usize,

    /// Cards dealt to each player
    #[arg(long = "hand-size", default_value_t = HAND_SIZE)]
    hand_size: usize,

    /// How the engine names a color when a bot leaves it open
    #[arg(long = "color-policy", value_enum, default_value = "uniform")]
    color_policy: PolicyArg,

    /// Print the table and every turn (best with --games 1)
    #[arg(long = "visualize")]
    visualize: bool,

    /// Player bot specs: first, random[:seed], heuristic (2-10 total)
    bots: Vec<String>,
}

#[derive(Default)]
struct Tally {
    wins: Vec<usize>,
    points: Vec<u64>,
    drawn: usize,
    aborted: usize,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let specs = if args.bots.is_empty() {
        vec![String::from("heuristic"), String::from("random")]
    } else {
        args.bots.clone()
    };
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&specs.len()) {
        return Err(format!(
            "expected between {MIN_PLAYERS} and {MAX_PLAYERS} players, received {}",
            specs.len()
        )
        .into());
    }

    let mut tally = Tally {
        wins: vec![0; specs.len()],
        points: vec![0; specs.len()],
        ..Tally::default()
    };
    for game_index in 0..args.games {
        let seed = args.seed.wrapping_add(game_index as u64);
        let mut bots = specs
            .iter()
            .enumerate()
            .map(|(seat, spec)| create_bot_from_spec(spec, seat, seed))
            .collect::<Result<Vec<_>, _>>()?;
        let game = GameBuilder::new(specs.len(), seed)?
            .with_hand_size(args.hand_size)
            .with_color_policy(args.color_policy.into())
            .build()?;
        play_round(game, &mut bots, &args, &mut tally)?;
    }

    println!("Results over {} rounds:", args.games);
    for (seat, spec) in specs.iter().enumerate() {
        let rate = if args.games == 0 {
            0.0
        } else {
            tally.wins[seat] as f64 * 100.0 / args.games as f64
        };
        println!(
            "  seat {seat} ({:<10}) wins {:>5} ({rate:5.1}%)  points {:>7}",
            label_for_spec(spec),
            tally.wins[seat],
            tally.points[seat]
        );
    }
    if tally.drawn > 0 || tally.aborted > 0 {
        println!(
            "\n{} round(s) drawn, {} aborted at the turn limit.",
            tally.drawn, tally.aborted
        );
    }
    Ok(())
}

fn play_round(
    mut game: Game,
    bots: &mut [Box<dyn Strategy>],
    args: &Args,
    tally: &mut Tally,
) -> Result<(), Box<dyn Error>> {
    game.start()?;
    if args.visualize {
        println!("{}", render_state(&game.state_view()));
    }
    while !game.is_finished() {
        if game.turn() >= args.max_turns {
            log::info!("round aborted after {} turns", game.turn());
            tally.aborted += 1;
            return Ok(());
        }
        let seat = game.current_player();
        game.play_turn_with(bots[seat].as_mut())?;
        if args.visualize {
            if let Some(event) = game.last_event() {
                println!("{}", describe_event(event));
            }
        }
    }
    match game.winner() {
        Some(winner) => {
            tally.wins[winner] += 1;
            tally.points[winner] += game.winner_points()? as u64;
            if args.visualize {
                println!("\n{}", render_state(&game.state_view()));
                println!("Scores left in hand: {:?}", game.calculate_scores()?);
            }
        }
        None => tally.drawn += 1,
    }
    Ok(())
}
