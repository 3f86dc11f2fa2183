//! High-level orchestrator: command entrypoints and free-text dispatch.
//!
//! [`GameService`] owns the store and the injected transport seams, and
//! drives the core engine under the per-session lock. Every entrypoint
//! sends its own replies (success and failure) through the messenger, so
//! the outer command router stays a thin shim.

use std::str::FromStr;
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use roulette_core::{
    FireTarget, GameConfig, GameEngine, GameOver, GameState, ItemEffect, ItemKind, ItemUse,
    Player, PlayerId, Reload,
};

use crate::config::RuntimeConfig;
use crate::error::EngineError;
use crate::render;
use crate::session::SessionPhase;
use crate::store::SessionStore;
use crate::supervisor;
use crate::transport::{InputPrompt, Messenger, SessionId};

pub struct GameService {
    store: Arc<SessionStore>,
    messenger: Arc<dyn Messenger>,
    prompt: Arc<dyn InputPrompt>,
    config: RuntimeConfig,
    game_config: GameConfig,
}

impl GameService {
    pub fn new(
        messenger: Arc<dyn Messenger>,
        prompt: Arc<dyn InputPrompt>,
        config: RuntimeConfig,
    ) -> Self {
        Self {
            store: Arc::new(SessionStore::new()),
            messenger,
            prompt,
            config,
            game_config: GameConfig::default(),
        }
    }

    /// The session store, shared for inspection (status handlers, tests).
    pub fn store(&self) -> Arc<SessionStore> {
        Arc::clone(&self.store)
    }

    pub async fn on_create(&self, session: &SessionId, sender_name: &str, sender_id: &str) {
        let creator = Player::new(sender_name, sender_id);
        let creator_id = creator.id.clone();
        match self.store.create(session.clone(), creator.clone()).await {
            Ok(_) => {
                supervisor::spawn_join_timeout(
                    Arc::clone(&self.store),
                    Arc::clone(&self.messenger),
                    session.clone(),
                    creator_id,
                    self.config.max_wait,
                );
                self.messenger
                    .send_text(session, &render::created(&creator))
                    .await;
            }
            Err(err) => self.messenger.send_text(session, &err.reply()).await,
        }
    }

    pub async fn on_join(&self, session: &SessionId, sender_name: &str, sender_id: &str) {
        let joiner = Player::new(sender_name, sender_id);
        match self.store.join(session, joiner).await {
            Ok(snapshot) => {
                let SessionPhase::Full { creator, joiner } = &snapshot.phase else {
                    // join only ever returns a Full snapshot
                    warn!(session = %session, "join returned a non-full snapshot");
                    return;
                };
                self.messenger
                    .send_text(session, &render::joined(creator, joiner))
                    .await;
            }
            Err(err) => self.messenger.send_text(session, &err.reply()).await,
        }
    }

    pub async fn on_start(&self, session: &SessionId, sender_id: &str) {
        let requester = PlayerId::from(sender_id);
        let mut rng = StdRng::from_entropy();
        match self
            .store
            .start(session, &requester, &self.game_config, &mut rng)
            .await
        {
            Ok((report, snapshot)) => {
                let SessionPhase::Started { game } = &snapshot.phase else {
                    warn!(session = %session, "start returned a non-started snapshot");
                    return;
                };
                let first_mention = self.messenger.mention(&game.player(report.first).id);
                self.messenger
                    .send_text(session, &render::started(&report, game, &first_mention))
                    .await;
            }
            Err(err) => self.messenger.send_text(session, &err.reply()).await,
        }
    }

    pub async fn on_status(&self, session: &SessionId) {
        match self.store.get(session).await {
            Some(entry) => {
                let entry = entry.lock().await;
                self.messenger
                    .send_text(session, &render::pending_status(&entry))
                    .await;
            }
            None => {
                self.messenger
                    .send_text(session, &EngineError::NotFound.reply())
                    .await;
            }
        }
    }

    pub async fn on_end(&self, session: &SessionId, sender_id: &str) {
        let requester = PlayerId::from(sender_id);
        match self.store.end(session, &requester, &self.config).await {
            Ok(_) => {
                let by = self.messenger.mention(&requester);
                self.messenger.send_text(session, &render::ended(&by)).await;
            }
            Err(err) => self.messenger.send_text(session, &err.reply()).await,
        }
    }

    /// Classifies free text from the chat: a fire target, an item the
    /// current player holds, or noise to ignore.
    ///
    /// The session lock is held for the entire call, including the
    /// adrenaline prompt, so no other action can interleave with an
    /// in-flight use.
    pub async fn on_free_text(&self, session: &SessionId, sender_id: &str, text: &str) {
        let Some(entry) = self.store.get(session).await else {
            return;
        };
        let mut entry = entry.lock().await;
        let SessionPhase::Started { game } = &mut entry.phase else {
            return;
        };

        let sender = PlayerId::from(sender_id);
        if game.seat_of(&sender) != Some(game.current) {
            return;
        }

        let text = text.trim();
        if let Ok(target) = FireTarget::from_str(text) {
            self.handle_fire(session, game, target).await;
        } else if let Ok(item) = ItemKind::from_str(text) {
            if !game.current_player().holds(item) {
                debug!(session = %session, %item, "named an item they do not hold, ignoring");
                return;
            }
            if item == ItemKind::Adrenaline {
                self.handle_adrenaline(session, game, &sender).await;
            } else {
                self.handle_item(session, game, item).await;
            }
        }
    }

    async fn handle_fire(&self, session: &SessionId, game: &mut GameState, target: FireTarget) {
        let mut rng = StdRng::from_entropy();
        let outcome = GameEngine::new(game, &self.game_config).fire(target, &mut rng);
        info!(session = %session, ?target, shot = ?outcome.shot, "fire resolved");

        let next_mention = self.messenger.mention(&game.current_player().id);
        self.messenger
            .send_text(session, &render::fire(&outcome, &next_mention))
            .await;

        if let Some(reload) = outcome.reload {
            self.messenger
                .send_text(session, &render::reload(&reload))
                .await;
        }
        if let Some(game_over) = outcome.game_over {
            self.finish(session, game, game_over).await;
        }
    }

    async fn handle_item(&self, session: &SessionId, game: &mut GameState, item: ItemKind) {
        let mut rng = StdRng::from_entropy();
        match GameEngine::new(game, &self.game_config).use_item(item, None, &mut rng) {
            Ok(used) => {
                info!(session = %session, %item, "item used");
                self.report_item_use(session, game, &used).await;
            }
            Err(err) => {
                self.messenger
                    .send_text(session, &EngineError::from(err).reply())
                    .await;
            }
        }
    }

    async fn handle_adrenaline(
        &self,
        session: &SessionId,
        game: &mut GameState,
        sender: &PlayerId,
    ) {
        let timeout = self.config.prompt_timeout;
        self.messenger
            .send_text(session, &render::adrenaline_prompt(timeout.as_secs()))
            .await;

        // Suspension point: the session lock stays held while we wait.
        let Some(reply) = self.prompt.await_reply(session, sender, timeout).await else {
            debug!(session = %session, "adrenaline prompt timed out");
            self.messenger
                .send_text(session, &EngineError::TimedOut.reply())
                .await;
            return;
        };

        let reply = reply.trim();
        if reply.is_empty() {
            self.messenger
                .send_text(session, &render::adrenaline_empty_reply())
                .await;
            return;
        }
        let Ok(picked) = ItemKind::from_str(reply) else {
            self.messenger
                .send_text(session, &render::adrenaline_unknown_item(reply))
                .await;
            return;
        };

        let mut rng = StdRng::from_entropy();
        match GameEngine::new(game, &self.game_config).use_item(
            ItemKind::Adrenaline,
            Some(picked),
            &mut rng,
        ) {
            Ok(used) => {
                info!(session = %session, %picked, "adrenaline forced an opponent item");
                self.report_item_use(session, game, &used).await;
            }
            Err(err) => {
                self.messenger
                    .send_text(session, &EngineError::from(err).reply())
                    .await;
            }
        }
    }

    async fn report_item_use(&self, session: &SessionId, game: &GameState, used: &ItemUse) {
        self.messenger
            .send_text(session, &render::item_use(used))
            .await;

        let (reload, game_over) = chained(used);
        if let Some(reload) = reload {
            self.messenger
                .send_text(session, &render::reload(&reload))
                .await;
        }
        if let Some(game_over) = game_over {
            self.finish(session, game, game_over).await;
        }
    }

    /// Terminal path: announce the result and drop the session.
    async fn finish(&self, session: &SessionId, game: &GameState, game_over: GameOver) {
        let winner = self.messenger.mention(&game.player(game_over.winner).id);
        let loser = self.messenger.mention(&game.player(game_over.loser).id);
        info!(session = %session, winner = ?game_over.winner, "game over");

        self.store.remove(session).await;
        self.messenger
            .send_text(session, &render::game_over(&winner, &loser))
            .await;
    }
}

/// The reload/game-over signals of a use, looking through the adrenaline
/// delegation layer.
fn chained(used: &ItemUse) -> (Option<Reload>, Option<GameOver>) {
    match &used.effect {
        ItemEffect::Adrenaline { forced, .. } => (forced.reload, forced.game_over),
        _ => (used.reload, used.game_over),
    }
}
