mod common;
mod support;

use waymark::domain::game::{EndType, GameStatus};
use waymark::error::AppError;
use waymark::errors::ErrorCode;
use waymark::services::games::GameService;
use waymark::services::players::PlayerService;

use support::{pos, seed_place, seed_player, test_state};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_start_exactly_one_game() -> Result<(), AppError> {
    let state = test_state().await;
    let player = seed_player(&state, "racer").await;
    seed_place(&state, player.id, 37.5045, 127.0).await;

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let service = GameService::new(state.clone());
            let player_id = player.id;
            tokio::spawn(async move { service.create_game(player_id, pos(37.5, 127.0)).await })
        })
        .collect();

    let mut started = 0;
    for task in tasks {
        match task.await.expect("task joined") {
            Ok(_) => started += 1,
            Err(e) => assert_eq!(e.code(), ErrorCode::AlreadyInProgress),
        }
    }
    assert_eq!(started, 1);

    let active = GameService::new(state)
        .find_games_by_status(player.id, GameStatus::InProgress)
        .await?;
    assert_eq!(active.len(), 1);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_ends_record_exactly_one_result() -> Result<(), AppError> {
    let state = test_state().await;
    let player = seed_player(&state, "racer").await;
    let place = seed_place(&state, player.id, 37.5045, 127.0).await;
    let game = GameService::new(state.clone())
        .create_game(player.id, pos(37.5, 127.0))
        .await?;

    let tasks: Vec<_> = (0..6)
        .map(|_| {
            let service = GameService::new(state.clone());
            let (player_id, game_id, at) = (player.id, game.id, place.position);
            tokio::spawn(async move {
                service
                    .end_game(player_id, game_id, EndType::Arrived, at)
                    .await
            })
        })
        .collect();

    let mut results = Vec::new();
    for task in tasks {
        match task.await.expect("task joined") {
            Ok(result) => results.push(result),
            Err(e) => assert_eq!(e.code(), ErrorCode::GameAlreadyFinished),
        }
    }
    assert_eq!(results.len(), 1);

    let service = GameService::new(state.clone());
    assert_eq!(service.find_result(game.id).await?, results[0]);

    let reloaded = PlayerService::new(state).find_player(player.id).await?;
    assert_eq!(reloaded.total_score, results[0].score);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn different_players_play_side_by_side() -> Result<(), AppError> {
    let state = test_state().await;
    let owner = seed_player(&state, "owner").await;
    seed_place(&state, owner.id, 37.5045, 127.0).await;

    let mut ids = Vec::new();
    for i in 0..4 {
        ids.push(seed_player(&state, &format!("p{i}")).await.id);
    }

    let tasks: Vec<_> = ids
        .iter()
        .map(|&player_id| {
            let service = GameService::new(state.clone());
            tokio::spawn(async move { service.create_game(player_id, pos(37.5, 127.0)).await })
        })
        .collect();

    for task in tasks {
        task.await.expect("task joined")?;
    }
    Ok(())
}
