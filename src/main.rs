use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use yams_ai::ai::{AIPersonalityConfig, DecisionEngine, PersonalityId};
use yams_ai::config::{load_config, EngineConfig};
use yams_ai::service::{run_tournament, EngineRegistry, TableState};

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

// ============================================================================
// 示範牌桌
// ============================================================================

async fn play_demo_table(config: &EngineConfig, lineup: &[PersonalityId]) -> yams_ai::Result<()> {
    let registry = EngineRegistry::new();
    let players: Vec<(String, PersonalityId)> = lineup
        .iter()
        .enumerate()
        .map(|(i, p)| (format!("{}-{}", p.name(), i + 1), *p))
        .collect();

    for (i, (player_id, personality)) in players.iter().enumerate() {
        let rng = StdRng::seed_from_u64(config.table.seed.wrapping_add(i as u64 + 1));
        let engine = DecisionEngine::new(AIPersonalityConfig::from_id(*personality), rng)
            .with_thinking(config.thinking.clone());
        registry.register(player_id.clone(), engine);
    }

    let mut table = TableState::new(config.table.seed, &players);
    info!(seed = config.table.seed, players = players.len(), "Demo table started");

    while !table.is_over() {
        registry.play_turn(&mut table).await?;
    }

    for (player_id, total) in table.standings() {
        info!(player = %player_id, total, "Final score");
    }
    if let Some(leader) = table.leader() {
        info!(winner = %table.seats[leader].player_id, "Demo table finished");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing("info");

    let config = load_config();
    let mut lineup: Vec<PersonalityId> = config
        .table
        .personalities
        .iter()
        .map(|name| PersonalityId::resolve(name))
        .collect();
    if lineup.is_empty() {
        lineup = PersonalityId::all().to_vec();
    }

    play_demo_table(&config, &lineup).await?;

    let games = config.tournament.games;
    let base_seed = config.tournament.base_seed;
    let tournament_lineup = lineup.clone();
    let summary = tokio::task::spawn_blocking(move || {
        run_tournament(&tournament_lineup, games, base_seed)
    })
    .await??;

    info!(games = summary.games, base_seed, "Tournament summary");
    for (i, seat) in summary.seats.iter().enumerate() {
        let average = format!("{:.1}", seat.average_score());
        info!(
            seat = i + 1,
            personality = seat.personality.name(),
            average = %average,
            best = seat.best_score,
            wins = seat.wins,
            yams = seat.yams,
            "Seat result"
        );
    }

    Ok(())
}
