//! Governance track tables.
//!
//! Relay-chain OpenGov tracks share ids and names across Polkadot, Kusama and
//! Westend; decision deposits are kept in whole tokens here and scaled by the
//! network's decimals when the table is built.

use std::collections::BTreeMap;

use crate::models::{Balance, BlockNumber, Network, Track, TrackId};

const MINUTES: BlockNumber = 10;
const HOURS: BlockNumber = 60 * MINUTES;
const DAYS: BlockNumber = 24 * HOURS;

struct TrackSpec {
    id: TrackId,
    name: &'static str,
    max_deciding: u32,
    deposit_tokens: Balance,
    prepare_period: BlockNumber,
    decision_period: BlockNumber,
    confirm_period: BlockNumber,
    min_enactment_period: BlockNumber,
}

#[rustfmt::skip]
const POLKADOT_TRACKS: &[TrackSpec] = &[
    TrackSpec { id: 0,  name: "Root",                max_deciding: 1,    deposit_tokens: 100_000, prepare_period: 2 * HOURS,   decision_period: 28 * DAYS, confirm_period: 24 * HOURS,  min_enactment_period: 24 * HOURS },
    TrackSpec { id: 1,  name: "WhitelistedCaller",   max_deciding: 100,  deposit_tokens: 10_000,  prepare_period: 30 * MINUTES, decision_period: 28 * DAYS, confirm_period: 10 * MINUTES, min_enactment_period: 10 * MINUTES },
    TrackSpec { id: 2,  name: "WishForChange",       max_deciding: 10,   deposit_tokens: 20_000,  prepare_period: 2 * HOURS,   decision_period: 28 * DAYS, confirm_period: 24 * HOURS,  min_enactment_period: 10 * MINUTES },
    TrackSpec { id: 10, name: "StakingAdmin",        max_deciding: 10,   deposit_tokens: 5_000,   prepare_period: 2 * HOURS,   decision_period: 28 * DAYS, confirm_period: 3 * HOURS,   min_enactment_period: 10 * MINUTES },
    TrackSpec { id: 11, name: "Treasurer",           max_deciding: 10,   deposit_tokens: 1_000,   prepare_period: 2 * HOURS,   decision_period: 28 * DAYS, confirm_period: 7 * DAYS,    min_enactment_period: 24 * HOURS },
    TrackSpec { id: 12, name: "LeaseAdmin",          max_deciding: 10,   deposit_tokens: 5_000,   prepare_period: 2 * HOURS,   decision_period: 28 * DAYS, confirm_period: 3 * HOURS,   min_enactment_period: 10 * MINUTES },
    TrackSpec { id: 13, name: "FellowshipAdmin",     max_deciding: 10,   deposit_tokens: 5_000,   prepare_period: 2 * HOURS,   decision_period: 28 * DAYS, confirm_period: 3 * HOURS,   min_enactment_period: 10 * MINUTES },
    TrackSpec { id: 14, name: "GeneralAdmin",        max_deciding: 10,   deposit_tokens: 5_000,   prepare_period: 2 * HOURS,   decision_period: 28 * DAYS, confirm_period: 3 * HOURS,   min_enactment_period: 10 * MINUTES },
    TrackSpec { id: 15, name: "AuctionAdmin",        max_deciding: 10,   deposit_tokens: 5_000,   prepare_period: 2 * HOURS,   decision_period: 28 * DAYS, confirm_period: 3 * HOURS,   min_enactment_period: 10 * MINUTES },
    TrackSpec { id: 20, name: "ReferendumCanceller", max_deciding: 1_000, deposit_tokens: 10_000, prepare_period: 2 * HOURS,   decision_period: 7 * DAYS,  confirm_period: 3 * HOURS,   min_enactment_period: 10 * MINUTES },
    TrackSpec { id: 21, name: "ReferendumKiller",    max_deciding: 1_000, deposit_tokens: 50_000, prepare_period: 2 * HOURS,   decision_period: 28 * DAYS, confirm_period: 3 * HOURS,   min_enactment_period: 10 * MINUTES },
    TrackSpec { id: 30, name: "SmallTipper",         max_deciding: 200,  deposit_tokens: 1,       prepare_period: MINUTES,     decision_period: 7 * DAYS,  confirm_period: 10 * MINUTES, min_enactment_period: MINUTES },
    TrackSpec { id: 31, name: "BigTipper",           max_deciding: 100,  deposit_tokens: 10,      prepare_period: 10 * MINUTES, decision_period: 7 * DAYS,  confirm_period: HOURS,       min_enactment_period: 10 * MINUTES },
    TrackSpec { id: 32, name: "SmallSpender",        max_deciding: 50,   deposit_tokens: 100,     prepare_period: 4 * HOURS,   decision_period: 28 * DAYS, confirm_period: 12 * HOURS,  min_enactment_period: 24 * HOURS },
    TrackSpec { id: 33, name: "MediumSpender",       max_deciding: 50,   deposit_tokens: 200,     prepare_period: 4 * HOURS,   decision_period: 28 * DAYS, confirm_period: 24 * HOURS,  min_enactment_period: 24 * HOURS },
    TrackSpec { id: 34, name: "BigSpender",          max_deciding: 50,   deposit_tokens: 400,     prepare_period: 4 * HOURS,   decision_period: 28 * DAYS, confirm_period: 48 * HOURS,  min_enactment_period: 24 * HOURS },
];

/// Kusama and Westend run shorter periods and smaller deposits
#[rustfmt::skip]
const KUSAMA_TRACKS: &[TrackSpec] = &[
    TrackSpec { id: 0,  name: "Root",                max_deciding: 1,    deposit_tokens: 3_333,   prepare_period: 2 * HOURS,   decision_period: 14 * DAYS, confirm_period: 24 * HOURS,  min_enactment_period: 24 * HOURS },
    TrackSpec { id: 1,  name: "WhitelistedCaller",   max_deciding: 100,  deposit_tokens: 333,     prepare_period: 30 * MINUTES, decision_period: 14 * DAYS, confirm_period: 10 * MINUTES, min_enactment_period: 10 * MINUTES },
    TrackSpec { id: 2,  name: "WishForChange",       max_deciding: 10,   deposit_tokens: 666,     prepare_period: 2 * HOURS,   decision_period: 14 * DAYS, confirm_period: 24 * HOURS,  min_enactment_period: 10 * MINUTES },
    TrackSpec { id: 10, name: "StakingAdmin",        max_deciding: 10,   deposit_tokens: 166,     prepare_period: 2 * HOURS,   decision_period: 14 * DAYS, confirm_period: 3 * HOURS,   min_enactment_period: 10 * MINUTES },
    TrackSpec { id: 11, name: "Treasurer",           max_deciding: 10,   deposit_tokens: 33,      prepare_period: 2 * HOURS,   decision_period: 14 * DAYS, confirm_period: 3 * HOURS,   min_enactment_period: 24 * HOURS },
    TrackSpec { id: 12, name: "LeaseAdmin",          max_deciding: 10,   deposit_tokens: 166,     prepare_period: 2 * HOURS,   decision_period: 14 * DAYS, confirm_period: 3 * HOURS,   min_enactment_period: 10 * MINUTES },
    TrackSpec { id: 13, name: "FellowshipAdmin",     max_deciding: 10,   deposit_tokens: 166,     prepare_period: 2 * HOURS,   decision_period: 14 * DAYS, confirm_period: 3 * HOURS,   min_enactment_period: 10 * MINUTES },
    TrackSpec { id: 14, name: "GeneralAdmin",        max_deciding: 10,   deposit_tokens: 166,     prepare_period: 2 * HOURS,   decision_period: 14 * DAYS, confirm_period: 3 * HOURS,   min_enactment_period: 10 * MINUTES },
    TrackSpec { id: 15, name: "AuctionAdmin",        max_deciding: 10,   deposit_tokens: 166,     prepare_period: 2 * HOURS,   decision_period: 14 * DAYS, confirm_period: 3 * HOURS,   min_enactment_period: 10 * MINUTES },
    TrackSpec { id: 20, name: "ReferendumCanceller", max_deciding: 1_000, deposit_tokens: 333,    prepare_period: 2 * HOURS,   decision_period: 7 * DAYS,  confirm_period: 3 * HOURS,   min_enactment_period: 10 * MINUTES },
    TrackSpec { id: 21, name: "ReferendumKiller",    max_deciding: 1_000, deposit_tokens: 1_666,  prepare_period: 2 * HOURS,   decision_period: 14 * DAYS, confirm_period: 3 * HOURS,   min_enactment_period: 10 * MINUTES },
    TrackSpec { id: 30, name: "SmallTipper",         max_deciding: 200,  deposit_tokens: 1,       prepare_period: MINUTES,     decision_period: 7 * DAYS,  confirm_period: 10 * MINUTES, min_enactment_period: MINUTES },
    TrackSpec { id: 31, name: "BigTipper",           max_deciding: 100,  deposit_tokens: 3,       prepare_period: 10 * MINUTES, decision_period: 7 * DAYS,  confirm_period: HOURS,       min_enactment_period: 10 * MINUTES },
    TrackSpec { id: 32, name: "SmallSpender",        max_deciding: 50,   deposit_tokens: 33,      prepare_period: 4 * HOURS,   decision_period: 14 * DAYS, confirm_period: 12 * HOURS,  min_enactment_period: 24 * HOURS },
    TrackSpec { id: 33, name: "MediumSpender",       max_deciding: 50,   deposit_tokens: 66,      prepare_period: 4 * HOURS,   decision_period: 14 * DAYS, confirm_period: 24 * HOURS,  min_enactment_period: 24 * HOURS },
    TrackSpec { id: 34, name: "BigSpender",          max_deciding: 50,   deposit_tokens: 133,     prepare_period: 4 * HOURS,   decision_period: 14 * DAYS, confirm_period: 48 * HOURS,  min_enactment_period: 24 * HOURS },
];

/// All governance tracks of a network, keyed by track id
pub fn get_all_tracks(network: Network) -> BTreeMap<TrackId, Track> {
    let specs = match network {
        Network::Polkadot => POLKADOT_TRACKS,
        Network::Kusama | Network::Westend => KUSAMA_TRACKS,
    };
    let unit: Balance = 10u128.pow(network.token_decimals());

    specs
        .iter()
        .map(|spec| {
            let track = Track {
                id: spec.id,
                name: spec.name,
                max_deciding: spec.max_deciding,
                decision_deposit: spec.deposit_tokens * unit,
                prepare_period: spec.prepare_period,
                decision_period: spec.decision_period,
                confirm_period: spec.confirm_period,
                min_enactment_period: spec.min_enactment_period,
            };
            (spec.id, track)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polkadot_tracks() {
        let tracks = get_all_tracks(Network::Polkadot);
        assert_eq!(tracks.len(), 16);
        let root = &tracks[&0];
        assert_eq!(root.name, "Root");
        assert_eq!(root.max_deciding, 1);
        assert_eq!(root.decision_deposit, 100_000 * 10u128.pow(10));
        assert_eq!(root.decision_period, 28 * DAYS);
    }

    #[test]
    fn test_networks_share_track_ids() {
        let polkadot: Vec<_> = get_all_tracks(Network::Polkadot).into_keys().collect();
        let kusama: Vec<_> = get_all_tracks(Network::Kusama).into_keys().collect();
        let westend: Vec<_> = get_all_tracks(Network::Westend).into_keys().collect();
        assert_eq!(polkadot, kusama);
        assert_eq!(kusama, westend);
    }

    #[test]
    fn test_kusama_deposit_scaled_by_twelve_decimals() {
        let tracks = get_all_tracks(Network::Kusama);
        assert_eq!(tracks[&30].decision_deposit, 10u128.pow(12));
    }
}
