use creature_arena::roster::{self, RosterEntry};
use creature_arena::{
    BattlePhase, BattleResult, GameMode, MatchController, TurnRng, TEAM_SIZE,
};
use catalog::{CatalogClient, Category};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, BufRead, Write};

#[tokio::main]
async fn main() {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let mode = match prompt_mode(&mut lines) {
        Some(mode) => mode,
        None => return,
    };
    let category = match prompt_category(&mut lines) {
        Some(category) => category,
        None => return,
    };
    let chosen_id = if mode == GameMode::Team {
        None
    } else {
        match prompt_creature_id(category, &mut lines) {
            Some(choice) => choice,
            None => return,
        }
    };

    let client = CatalogClient::new();
    let mut rng = StdRng::from_os_rng();

    println!("Fetching rosters from the catalog...");
    let mut controller = match assemble_match(&client, mode, category, chosen_id, &mut rng).await {
        Ok(controller) => controller,
        Err(e) => {
            println!("Error assembling the match: {}", e);
            return;
        }
    };

    print_log(controller.state().log.iter());

    loop {
        let state = controller.state();
        match state.phase {
            BattlePhase::Finished(result) => {
                if mode == GameMode::League {
                    if !handle_league_break(&mut controller, result, &mut rng, &mut lines) {
                        return;
                    }
                    print_log(controller.state().log.iter());
                    continue;
                }
                return;
            }
            BattlePhase::AwaitingReplacement => {
                if !handle_forced_switch(&mut controller, &mut lines) {
                    return;
                }
                continue;
            }
            BattlePhase::AwaitingAction => {}
        }

        print_status(&controller);
        let active = controller.state().player_team.active();
        println!("Moves:");
        for (i, battle_move) in active.moves.iter().enumerate() {
            println!(
                "  {}: {} ({}, power {})",
                i + 1,
                battle_move.name,
                battle_move.element,
                battle_move.effective_power()
            );
        }
        if mode == GameMode::Team {
            println!("  s: switch creature");
        }

        let Some(input) = prompt("Choose a move: ", &mut lines) else {
            return;
        };

        if mode == GameMode::Team && input.eq_ignore_ascii_case("s") {
            if !handle_voluntary_switch(&mut controller, &mut lines) {
                return;
            }
            continue;
        }

        let Ok(choice) = input.parse::<usize>() else {
            println!("Enter a move number.");
            continue;
        };
        if choice == 0 {
            println!("Enter a move number.");
            continue;
        }

        match controller.submit_player_attack(choice - 1, TurnRng::new_random()) {
            Ok(bus) => {
                for line in bus.formatted_lines() {
                    println!("{}", line);
                }
            }
            Err(e) => println!("{}", e),
        }
    }
}

async fn assemble_match(
    client: &CatalogClient,
    mode: GameMode,
    category: Category,
    chosen_id: Option<u32>,
    rng: &mut StdRng,
) -> creature_arena::EngineResult<MatchController> {
    match mode {
        GameMode::Single => {
            let id = chosen_id.unwrap_or_else(|| pick_id(category, rng));
            let RosterEntry { combatant, .. } = roster::build_entry(client, id, rng).await?;
            let opponents =
                roster::build_opponents(client, category, &[combatant.id], 1, rng).await?;
            let opponent = opponents.into_iter().next().expect("one opponent drawn");
            println!("You drew {}. Your opponent is {}.", combatant.name, opponent.name);
            MatchController::new_single(combatant, opponent)
        }
        GameMode::Team => {
            let player_ids =
                creature_arena::draw_opponent_ids(category, &[], TEAM_SIZE, rng);
            let mut players = Vec::with_capacity(TEAM_SIZE);
            for id in &player_ids {
                players.push(roster::build_combatant(client, *id, rng).await?);
            }
            let opponents =
                roster::build_opponents(client, category, &player_ids, TEAM_SIZE, rng).await?;
            MatchController::new_team(players, opponents)
        }
        GameMode::League => {
            let id = chosen_id.unwrap_or_else(|| pick_id(category, rng));
            let RosterEntry {
                combatant,
                move_pool,
            } = roster::build_entry(client, id, rng).await?;
            println!("You drew {} for the league.", combatant.name);
            let opponents =
                roster::build_league_opponents(client, category, combatant.id, rng).await?;
            MatchController::new_league(combatant, opponents, move_pool)
        }
    }
}

fn pick_id(category: Category, rng: &mut StdRng) -> u32 {
    creature_arena::draw_opponent_ids(category, &[], 1, rng)[0]
}

fn handle_forced_switch(
    controller: &mut MatchController,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> bool {
    println!("You need to switch to another creature.");
    let team = &controller.state().player_team;
    for index in team.bench_indices() {
        let member = team.member(index).expect("bench index is valid");
        println!(
            "  {}: {} (HP {}/{})",
            index + 1,
            member.name,
            member.current_hp,
            member.max_hp
        );
    }

    loop {
        let Some(input) = prompt("Send out: ", lines) else {
            return false;
        };
        let Ok(choice) = input.parse::<usize>() else {
            println!("Enter a creature number.");
            continue;
        };
        if choice == 0 {
            println!("Enter a creature number.");
            continue;
        }
        match controller.submit_player_switch(choice - 1) {
            Ok(bus) => {
                for line in bus.formatted_lines() {
                    println!("{}", line);
                }
                return true;
            }
            Err(e) => println!("{}", e),
        }
    }
}

fn handle_voluntary_switch(
    controller: &mut MatchController,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> bool {
    let team = &controller.state().player_team;
    let bench = team.bench_indices();
    if bench.is_empty() {
        println!("No one left on the bench.");
        return true;
    }
    for index in &bench {
        let member = team.member(*index).expect("bench index is valid");
        println!(
            "  {}: {} (HP {}/{})",
            index + 1,
            member.name,
            member.current_hp,
            member.max_hp
        );
    }

    let Some(input) = prompt("Switch to: ", lines) else {
        return false;
    };
    match input.parse::<usize>() {
        Ok(choice) if choice > 0 => match controller.submit_player_switch(choice - 1) {
            Ok(bus) => {
                for line in bus.formatted_lines() {
                    println!("{}", line);
                }
            }
            Err(e) => println!("{}", e),
        },
        _ => println!("Enter a creature number."),
    }
    true
}

/// Between-round league prompt. Returns false when the run is over or input
/// ended.
fn handle_league_break(
    controller: &mut MatchController,
    result: BattleResult,
    rng: &mut StdRng,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> bool {
    if result == BattleResult::Lose {
        println!("Your league run is over.");
        return false;
    }
    if controller.league_complete() {
        println!("You conquered the league!");
        return false;
    }

    let round = controller.league_round().unwrap_or(0) + 1;
    println!("Round {} won!", round);
    println!("  1: continue as you are");
    println!("  2: draw a fresh set of moves, then continue");

    loop {
        let Some(input) = prompt("Next: ", lines) else {
            return false;
        };
        let outcome = match input.as_str() {
            "1" => controller.advance_round(),
            "2" => controller.update_moves_and_continue(rng),
            _ => {
                println!("Enter 1 or 2.");
                continue;
            }
        };
        match outcome {
            Ok(_) => return true,
            Err(e) => {
                println!("{}", e);
                return false;
            }
        }
    }
}

fn print_status(controller: &MatchController) {
    let state = controller.state();
    let player = state.player_team.active();
    let opponent = state.opponent_team.active();
    println!();
    println!(
        "Your {}: HP {}/{}   Opponent {}: HP {}/{}",
        player.name,
        player.current_hp,
        player.max_hp,
        opponent.name,
        opponent.current_hp,
        opponent.max_hp
    );
}

fn print_log<'a>(lines: impl Iterator<Item = &'a String>) {
    for line in lines {
        println!("{}", line);
    }
}

fn prompt_mode(lines: &mut impl Iterator<Item = io::Result<String>>) -> Option<GameMode> {
    println!("Creature Arena");
    println!("  1: single battle");
    println!("  2: team battle (5 vs 5)");
    println!("  3: league (5 rounds)");
    loop {
        let input = prompt("Mode: ", lines)?;
        match input.as_str() {
            "1" => return Some(GameMode::Single),
            "2" => return Some(GameMode::Team),
            "3" => return Some(GameMode::League),
            _ => println!("Enter 1, 2, or 3."),
        }
    }
}

fn prompt_category(lines: &mut impl Iterator<Item = io::Result<String>>) -> Option<Category> {
    println!("  1: normal");
    println!("  2: rare");
    println!("  3: legendary");
    println!("  4: mythical");
    loop {
        let input = prompt("Category: ", lines)?;
        match input.as_str() {
            "1" => return Some(Category::Normal),
            "2" => return Some(Category::Rare),
            "3" => return Some(Category::Legendary),
            "4" => return Some(Category::Mythical),
            _ => println!("Enter 1 through 4."),
        }
    }
}

/// Outer `None` means input ended; inner `None` means a random draw.
fn prompt_creature_id(
    category: Category,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Option<Option<u32>> {
    loop {
        let input = prompt("Creature id (blank for a random draw): ", lines)?;
        if input.is_empty() {
            return Some(None);
        }
        match input.parse::<u32>() {
            Ok(id) if category.contains(id) => return Some(Some(id)),
            Ok(id) => println!("Id {} is not in the {} category.", id, category),
            Err(_) => println!("Enter a numeric id or leave blank."),
        }
    }
}

fn prompt(
    label: &str,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Option<String> {
    print!("{}", label);
    let _ = io::stdout().flush();
    match lines.next() {
        Some(Ok(line)) => Some(line.trim().to_string()),
        _ => None,
    }
}
