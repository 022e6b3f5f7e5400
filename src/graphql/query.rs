use async_graphql::{Context, Object, Result};

use crate::config::Config;
use crate::db::{Ledger, Snapshot};
use crate::models::category::Category;
use crate::models::event::Event;
use crate::models::player::{Character, Player, PlayerId};
use crate::models::report::{MonthReport, PlayerMonth};
use crate::models::settings::Settings;
use crate::util::month_number;

pub struct QueryRoot;

fn ledger<'c>(ctx: &Context<'c>) -> Result<&'c Snapshot> {
    ctx.data::<Snapshot>()
}

fn minimum_value_for(ctx: &Context<'_>, requested: Option<f64>) -> Option<f64> {
    requested.or_else(|| {
        ctx.data_opt::<Config>()
            .and_then(|config| config.minimum_value)
    })
}

#[Object]
impl QueryRoot {
    /// Points and value totals for everyone active during a month
    pub async fn month_report(
        &self,
        ctx: &Context<'_>,
        month: i32,
        year: i32,
        minimum_value: Option<f64>,
    ) -> Result<MonthReport> {
        let month = month_number(month.into())?;
        let minimum_value = minimum_value_for(ctx, minimum_value);

        MonthReport::compute(ledger(ctx)?, month, year, minimum_value).map_err(Into::into)
    }

    /// One player's attended events and points for a month
    pub async fn player_month(
        &self,
        ctx: &Context<'_>,
        name: String,
        month: i32,
        year: i32,
        minimum_value: Option<f64>,
    ) -> Result<PlayerMonth> {
        let ledger = ledger(ctx)?;
        let player = ledger
            .roster()
            .player_named(&name)
            .ok_or_else(|| format!("No player named {}", name))?;
        let month = month_number(month.into())?;
        let minimum_value = minimum_value_for(ctx, minimum_value);

        PlayerMonth::compute(ledger, player, month, year, minimum_value).map_err(Into::into)
    }

    /// Events still waiting on approval, oldest first
    pub async fn pending_events(&self, ctx: &Context<'_>) -> Result<Vec<Event>> {
        ledger(ctx)?.pending_events().map_err(Into::into)
    }

    /// Every player, ordered by name
    pub async fn players(&self, ctx: &Context<'_>) -> Result<Vec<Player>> {
        Ok(ledger(ctx)?
            .roster()
            .players()
            .into_iter()
            .cloned()
            .collect())
    }

    pub async fn characters(
        &self,
        ctx: &Context<'_>,
        player: PlayerId,
        #[graphql(default = false)] include_inactive: bool,
    ) -> Result<Vec<Character>> {
        let roster = ledger(ctx)?.roster();
        let characters: Vec<Character> = if include_inactive {
            roster.characters_of(player).cloned().collect()
        } else {
            roster
                .active_characters_of(player)
                .into_iter()
                .cloned()
                .collect()
        };

        Ok(characters)
    }

    pub async fn categories(&self, ctx: &Context<'_>) -> Result<Vec<Category>> {
        let settings = ledger(ctx)?.settings().unwrap_or_default();
        Ok(settings.categories.all().to_vec())
    }

    /// The stored settings, or the defaults if none were saved
    pub async fn settings(&self, ctx: &Context<'_>) -> Result<Settings> {
        Ok(ledger(ctx)?.settings().unwrap_or_default())
    }
}
