//! The war office - request handling around the battle engine
//!
//! Flow for a battle: authenticate -> fetch both armies -> resolve ->
//! record the battle -> tally the players. All of it happens under one
//! write lock, so a stored battle and its tally are never observed apart.

use tokio::sync::RwLock;

use crate::auth::{AuthToken, Credentials, UserDraft, UserProfile};
use crate::battle::{resolve_battle_with_rules, Combatant, VarianceSource};
use crate::core::config::WarfrontConfig;
use crate::core::error::{Result, WarError};
use crate::core::types::{ArmyId, BattleId};
use crate::registry::armies::ArmyBook;
use crate::registry::{Registry, WarStats};
use crate::roster::{Army, ArmyDraft, Battle, BattleRequest, Player, PlayerDraft};

pub struct WarOffice {
    registry: RwLock<Registry>,
    config: WarfrontConfig,
}

impl WarOffice {
    /// Fails with `Config` if the rules or auth settings are out of range
    pub fn new(config: WarfrontConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            registry: RwLock::new(Registry::new(&config.auth)),
            config,
        })
    }

    pub fn config(&self) -> &WarfrontConfig {
        &self.config
    }

    // ===== ACCOUNTS =====

    pub async fn signup(&self, draft: UserDraft) -> Result<AuthToken> {
        self.registry.write().await.auth.signup(draft)
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<AuthToken> {
        self.registry.write().await.auth.login(credentials)
    }

    pub async fn logout(&self, token: &str) -> bool {
        self.registry.write().await.auth.logout(token)
    }

    pub async fn current_user(&self, token: &str) -> Result<UserProfile> {
        self.registry.read().await.auth.authenticate(token)
    }

    // ===== PLAYERS =====

    /// Register a player, or return the existing one with that name
    pub async fn create_player(&self, draft: PlayerDraft) -> Result<Player> {
        if draft.name.trim().is_empty() {
            return Err(WarError::InvalidRequest("name must not be blank".into()));
        }
        let mut registry = self.registry.write().await;
        Ok(registry.players.get_or_create(&draft.name).clone())
    }

    pub async fn players(&self) -> Vec<Player> {
        let limit = self.config.listing.max_players;
        self.registry.read().await.players.list(limit)
    }

    pub async fn player(&self, name: &str) -> Result<Player> {
        self.registry
            .read()
            .await
            .players
            .get(name)
            .cloned()
            .ok_or_else(|| WarError::PlayerNotFound(name.to_string()))
    }

    // ===== ARMIES =====

    /// Build an army; the owning player is registered on first use
    pub async fn create_army(&self, token: &str, draft: ArmyDraft) -> Result<Army> {
        let mut guard = self.registry.write().await;
        let registry = &mut *guard;
        registry.auth.authenticate(token)?;
        draft.validate()?;

        let player_id = registry.players.get_or_create(&draft.player_name).id;
        let army = draft.into_army(player_id);
        tracing::info!(
            army = %army.id,
            player = %army.player_name,
            units = army.unit_count(),
            power = army.total_power,
            "Army created"
        );
        registry.armies.insert(army.clone());
        Ok(army)
    }

    pub async fn armies(&self) -> Vec<Army> {
        let limit = self.config.listing.max_armies;
        self.registry.read().await.armies.list(limit)
    }

    pub async fn army(&self, id: ArmyId) -> Result<Army> {
        self.registry
            .read()
            .await
            .armies
            .get(id)
            .cloned()
            .ok_or(WarError::ArmyNotFound(id))
    }

    /// Any authenticated caller may delete any army; past battles keep
    /// their copied ids and names
    pub async fn delete_army(&self, token: &str, id: ArmyId) -> Result<()> {
        let mut registry = self.registry.write().await;
        registry.auth.authenticate(token)?;
        if registry.armies.remove(id).is_none() {
            return Err(WarError::ArmyNotFound(id));
        }
        tracing::info!(army = %id, "Army deleted");
        Ok(())
    }

    // ===== BATTLES =====

    /// Resolve a battle between two stored armies and record the result
    ///
    /// The caller supplies the generator, one per battle.
    pub async fn create_battle<V: VarianceSource + ?Sized>(
        &self,
        token: &str,
        request: BattleRequest,
        rng: &mut V,
    ) -> Result<Battle> {
        let mut guard = self.registry.write().await;
        let registry = &mut *guard;
        registry.auth.authenticate(token)?;

        let army1 = combat_ready(&registry.armies, request.army1_id)?;
        let army2 = combat_ready(&registry.armies, request.army2_id)?;

        let outcome = resolve_battle_with_rules(
            &Combatant::from(army1),
            &Combatant::from(army2),
            &self.config.rules,
            rng,
        );
        let battle = Battle::from_outcome(army1, army2, outcome);

        registry.battles.record(battle.clone());
        registry
            .players
            .tally(&battle.winner_name, battle.loser_name());

        tracing::info!(
            battle = %battle.id,
            winner = %battle.winner_name,
            loser = %battle.loser_name(),
            "Battle recorded"
        );
        Ok(battle)
    }

    pub async fn battles(&self) -> Vec<Battle> {
        let limit = self.config.listing.max_battles;
        self.registry.read().await.battles.recent(limit)
    }

    pub async fn battle(&self, id: BattleId) -> Result<Battle> {
        self.registry
            .read()
            .await
            .battles
            .get(id)
            .cloned()
            .ok_or(WarError::BattleNotFound(id))
    }

    pub async fn stats(&self) -> WarStats {
        self.registry.read().await.stats()
    }
}

/// An army that exists and has at least one unit
fn combat_ready(armies: &ArmyBook, id: ArmyId) -> Result<&Army> {
    let army = armies.get(id).ok_or_else(|| {
        tracing::warn!(army = %id, "Battle requested with unknown army");
        WarError::InvalidArmy(format!("army {} not found", id))
    })?;
    if army.is_empty() {
        tracing::warn!(army = %id, "Battle requested with empty army");
        return Err(WarError::InvalidArmy(format!("army {} has no units", id)));
    }
    Ok(army)
}
