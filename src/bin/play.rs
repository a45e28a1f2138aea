//! Terminal client.
//!
//! Type part of a name to search; an exact name (or a search with a single result) is taken as
//! a guess. Commands: `/new`, `/give-up`, `/history`, `/random`, `/quit`.
//!
//! Logs go to stderr, or to a file when `GUESS_LOG` is set.

use guess_classmate::{
    logger::init_client_logger,
    prelude::*,
    render::{self, no_players, outcome_dialog, profile, warning},
};
use rand::rngs::ThreadRng;
use tokio::io::{stdin, AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::info;

const HELP: &str = "输入名字以查询你的同学 (/new 新游戏, /give-up 投降, /history 历史, /random 随机同学, /quit 退出)";

struct Game {
    debouncer: SearchDebouncer<ApiClient>,
    session: GameSession<ThreadRng>,
    lines: Lines<BufReader<Stdin>>,
}

impl Game {
    async fn next_line(&mut self) -> anyhow::Result<Option<String>> {
        Ok(self.lines.next_line().await?)
    }

    async fn new_round(&mut self) {
        let pool = self.debouncer.source().all_characters().await;
        info!(count = pool.len(), "pool fetched");
        if let Some(draw) = self.session.start_round(&pool) {
            println!("第 {} 局开始，共 {} 名同学", draw.round, pool.len());
        } else {
            println!("{}", no_players());
        }
    }

    /// Shows the outcome dialog, waits for acknowledgement, then starts the next round.
    async fn end_round(&mut self) -> anyhow::Result<bool> {
        if let Some(target) = self.session.target() {
            println!(
                "{}",
                outcome_dialog(self.session.outcome(), target, self.session.special_reveal())
            );
        }
        println!("按回车开始新游戏");
        if self.next_line().await?.is_none() {
            return Ok(false);
        }
        let pool = self.debouncer.source().all_characters().await;
        if self.session.dismiss(&pool).is_none() {
            println!("{}", no_players());
        }
        Ok(true)
    }

    async fn handle_input(&mut self, input: &str) -> anyhow::Result<bool> {
        if self.session.is_inert() {
            println!("{}", no_players());
            return Ok(true);
        }

        let candidates = self.debouncer.submit(input).await.unwrap_or_default();
        let chosen = candidates
            .iter()
            .find(|c| c.name == input)
            .or(if candidates.len() == 1 {
                candidates.first()
            } else {
                None
            })
            .cloned();

        let Some(chosen) = chosen else {
            if candidates.is_empty() {
                println!("没有找到匹配的同学");
            } else {
                let names: Vec<_> = candidates.iter().map(|c| c.name.as_str()).collect();
                println!("候选: {}", names.join(", "));
            }
            return Ok(true);
        };

        match self.session.guess(&chosen) {
            Ok(result) => {
                println!("{}", render::table(&self.session.scored_history()));
                if result.won {
                    return self.end_round().await;
                }
            }
            Err(GuessError::Duplicate(_)) => println!("{}", warning("不能重复猜测！")),
            Err(GuessError::NoTarget) => println!("{}", no_players()),
            Err(e) => println!("{}", warning(&e.to_string())),
        }
        Ok(true)
    }

    async fn run(&mut self) -> anyhow::Result<()> {
        self.new_round().await;
        println!("{HELP}");

        while let Some(line) = self.next_line().await? {
            let input = line.trim();
            let keep_going = match input {
                "" => true,
                "/quit" => false,
                "/new" => {
                    self.new_round().await;
                    true
                }
                "/give-up" => {
                    if self.session.concede().is_ok() {
                        self.end_round().await?
                    } else {
                        println!("{}", no_players());
                        true
                    }
                }
                "/random" => {
                    match self.debouncer.source().random_character().await {
                        Some(character) => println!("{}", profile(&character)),
                        None => println!("{}", no_players()),
                    }
                    true
                }
                "/history" => {
                    println!("{}", render::table(&self.session.scored_history()));
                    true
                }
                _ => self.handle_input(input).await?,
            };
            if !keep_going {
                break;
            }
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Configuration::from_env();
    init_client_logger(&config)?;

    let client = ApiClient::new(&config)?;
    let selector = TargetSelector::new()
        .with_special_identity(config.special_identity().map(str::to_owned))
        .with_guarantee_round(config.guarantee_round());

    let mut game = Game {
        debouncer: SearchDebouncer::new(client, config.search_debounce()),
        session: GameSession::new(selector),
        lines: BufReader::new(stdin()).lines(),
    };
    game.run().await
}
