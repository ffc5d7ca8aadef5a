//! Player - owns heroes, inventory, the active team and karts
//!
//! Every operation that names a hero, inventory slot or kart validates the
//! handle first and reports a typed error instead of doing nothing.

mod inventory;
mod kart;

pub use inventory::{Inventory, InventoryEntry};
pub use kart::ExplorationKart;

use crate::character::{Character, Hero, LevelUp, RankLookup};
use crate::config::GameData;
use crate::encounter::{Expedition, Reward};
use crate::equipment::{Currency, Equipment, Loadout};
use crate::error::{EngineError, EngineResult};
use crate::loot::Storable;
use crate::types::{EquipmentSlot, HeroId};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Where a currency is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemLocation {
    Inventory(usize),
    Equipped(HeroId, EquipmentSlot),
}

/// What a launched expedition paid out
#[derive(Debug, Clone, PartialEq)]
pub struct ExpeditionResult {
    pub complete: bool,
    pub reward: Reward,
    /// XP each hero on the kart received
    pub xp_each: f64,
    pub level_ups: Vec<(HeroId, LevelUp)>,
    /// Loot after rolling, as stored in the inventory
    pub items: Vec<Storable>,
}

impl ExpeditionResult {
    pub fn summary(&self) -> String {
        let outcome = if self.complete { "Cleared" } else { "Failed" };
        let mut line = format!("{outcome}: {}", self.reward.summary());
        if !self.level_ups.is_empty() {
            line.push_str(&format!(", {} level up(s)", self.level_ups.len()));
        }
        line
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    heroes: Vec<Hero>,
    inventory: Inventory,
    team: Vec<HeroId>,
    team_size: usize,
    karts: Vec<ExplorationKart>,
    next_id: u64,
}

impl Player {
    /// A player with no heroes and a single kart
    pub fn new(data: &GameData) -> Self {
        Player {
            heroes: Vec::new(),
            inventory: Inventory::new(),
            team: Vec::new(),
            team_size: data.constants.kart.team_size,
            karts: vec![ExplorationKart::new(&data.constants.kart)],
            next_id: 1,
        }
    }

    pub fn heroes(&self) -> &[Hero] {
        &self.heroes
    }

    pub fn hero(&self, id: HeroId) -> EngineResult<&Hero> {
        self.heroes
            .iter()
            .find(|h| h.id() == id)
            .ok_or_else(|| EngineError::NotFound(format!("hero {id}")))
    }

    pub fn hero_mut(&mut self, id: HeroId) -> EngineResult<&mut Hero> {
        self.heroes
            .iter_mut()
            .find(|h| h.id() == id)
            .ok_or_else(|| EngineError::NotFound(format!("hero {id}")))
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    pub fn team(&self) -> &[HeroId] {
        &self.team
    }

    pub fn karts(&self) -> &[ExplorationKart] {
        &self.karts
    }

    pub fn kart(&self, index: usize) -> EngineResult<&ExplorationKart> {
        self.karts
            .get(index)
            .ok_or_else(|| EngineError::NotFound(format!("kart {index}")))
    }

    fn kart_mut(&mut self, index: usize) -> EngineResult<&mut ExplorationKart> {
        self.karts
            .get_mut(index)
            .ok_or_else(|| EngineError::NotFound(format!("kart {index}")))
    }

    /// Roll a new hero. The rank is looked up once, up front.
    pub fn recruit<R: Rng + ?Sized>(
        &mut self,
        source_id: &str,
        name: &str,
        ranks: &impl RankLookup,
        data: &GameData,
        rng: &mut R,
    ) -> HeroId {
        let id = HeroId(self.next_id);
        self.next_id += 1;
        let rank = ranks.lookup_rank(source_id);
        self.heroes
            .push(Hero::create(id, source_id, name, rank, data, rng));
        info!(hero = %id, source_id, rank = rank.tier(), "hero recruited");
        id
    }

    /// Re-roll a hero with a freshly looked-up rank
    pub fn reset_hero<R: Rng + ?Sized>(
        &mut self,
        id: HeroId,
        ranks: &impl RankLookup,
        data: &GameData,
        rng: &mut R,
    ) -> EngineResult<()> {
        let hero = self.hero_mut(id)?;
        let rank = ranks.lookup_rank(hero.source_id());
        hero.reset(rank, data, rng);
        Ok(())
    }

    pub fn add_to_team(&mut self, id: HeroId) -> EngineResult<()> {
        self.hero(id)?;
        if self.team.contains(&id) {
            return Err(EngineError::InvalidTarget(format!(
                "hero {id} is already in the team"
            )));
        }
        if self.team.len() >= self.team_size {
            return Err(EngineError::CapacityExceeded {
                what: "team",
                capacity: self.team_size,
            });
        }
        self.team.push(id);
        Ok(())
    }

    /// Take a hero out of the team and off every kart
    pub fn remove_from_team(&mut self, id: HeroId) -> EngineResult<()> {
        let index = self
            .team
            .iter()
            .position(|h| *h == id)
            .ok_or_else(|| EngineError::NotFound(format!("hero {id} in the team")))?;
        for kart in self.karts.iter_mut().filter(|k| k.team().contains(&id)) {
            kart.remove_hero_from_team(id)?;
        }
        self.team.remove(index);
        Ok(())
    }

    pub fn add_kart(&mut self, data: &GameData) -> usize {
        self.karts.push(ExplorationKart::new(&data.constants.kart));
        self.karts.len() - 1
    }

    pub fn repair_kart(&mut self, kart: usize) -> EngineResult<usize> {
        self.kart_mut(kart)?.repair()
    }

    /// Seat a team member on a kart
    pub fn board(&mut self, kart: usize, id: HeroId) -> EngineResult<()> {
        if !self.team.contains(&id) {
            return Err(EngineError::InvalidTarget(format!(
                "hero {id} is not in the team"
            )));
        }
        self.kart_mut(kart)?.add_hero_to_team(id)
    }

    pub fn unboard(&mut self, kart: usize, id: HeroId) -> EngineResult<()> {
        self.kart_mut(kart)?.remove_hero_from_team(id)
    }

    /// Equip an inventory item on a hero; whatever it displaces goes back
    /// into the inventory. Nothing moves if the slot rejects the item.
    pub fn equip(
        &mut self,
        id: HeroId,
        inventory_index: usize,
        slot: EquipmentSlot,
        data: &GameData,
    ) -> EngineResult<()> {
        self.hero(id)?;
        let item = self.inventory.equipment(inventory_index)?;
        if !Loadout::accepts(slot, item.family()) {
            return Err(EngineError::InvalidSlot {
                item: item.name(),
                slot,
            });
        }

        let Storable::Equipment(item) = self.inventory.take(inventory_index)? else {
            return Err(EngineError::InvalidTarget(format!(
                "inventory slot {inventory_index} is not equipment"
            )));
        };
        let hero = self.hero_mut(id)?;
        match hero.character_mut().equip(slot, item, data) {
            Ok(displaced) => {
                if let Some(displaced) = displaced {
                    self.inventory.store(Storable::Equipment(displaced));
                }
                Ok(())
            }
            Err((error, item)) => {
                self.inventory.store(Storable::Equipment(item));
                Err(error)
            }
        }
    }

    /// Move an equipped item back into the inventory
    pub fn unequip(&mut self, id: HeroId, slot: EquipmentSlot, data: &GameData) -> EngineResult<()> {
        let removed = self.hero_mut(id)?.character_mut().unequip(slot, data)?;
        self.inventory.store(Storable::Equipment(removed));
        Ok(())
    }

    /// Spend one currency on an item. The currency is only consumed when
    /// the effect applies.
    pub fn use_currency<R: Rng + ?Sized>(
        &mut self,
        currency: Currency,
        target: ItemLocation,
        data: &GameData,
        rng: &mut R,
    ) -> EngineResult<()> {
        if self.inventory.quantity_of(currency.key()) == 0 {
            return Err(EngineError::NotFound(format!("no {currency} in the inventory")));
        }

        let limits = &data.constants.loot.affix_limits;
        match target {
            ItemLocation::Inventory(index) => {
                let item = self.inventory.equipment_mut(index)?;
                currency.apply(item, &data.items, limits, rng)?;
            }
            ItemLocation::Equipped(id, slot) => {
                let character = self.hero_mut(id)?.character_mut();
                let item: &mut Equipment = character.loadout_mut().get_mut(slot);
                currency.apply(item, &data.items, limits, rng)?;
                character.refresh(data);
            }
        }

        self.inventory.consume_currency(currency)
    }

    /// Send a kart's heroes on an expedition and collect the payout.
    ///
    /// XP is split evenly over the heroes aboard; loot is rolled and stored.
    pub fn launch_expedition<R: Rng + ?Sized>(
        &mut self,
        kart: usize,
        expedition: &mut Expedition,
        data: &GameData,
        rng: &mut R,
    ) -> EngineResult<ExpeditionResult> {
        let aboard: Vec<HeroId> = self.kart(kart)?.team().to_vec();
        if aboard.is_empty() {
            return Err(EngineError::InvalidTarget(format!("kart {kart} has no heroes aboard")));
        }

        let complete = {
            let mut team: Vec<&mut Character> = self
                .heroes
                .iter_mut()
                .filter(|h| aboard.contains(&h.id()))
                .map(|h| h.character_mut())
                .collect();
            expedition.launch(&mut team, data, rng)?
        };

        let reward = expedition.rewards();
        let xp_each = reward.xp_share(aboard.len());
        let mut level_ups = Vec::new();
        for hero in self.heroes.iter_mut().filter(|h| aboard.contains(&h.id())) {
            for level_up in hero.gain_xp(xp_each, data, rng) {
                level_ups.push((hero.id(), level_up));
            }
        }

        let items: Vec<Storable> = reward
            .loot
            .iter()
            .filter_map(|template| template.on_loot(data, rng))
            .collect();
        for item in &items {
            self.inventory.store(item.clone());
        }

        info!(
            kart,
            complete,
            xp_each,
            items = items.len(),
            level_ups = level_ups.len(),
            "expedition paid out"
        );
        Ok(ExpeditionResult {
            complete,
            reward,
            xp_each,
            level_ups,
            items,
        })
    }
}
