//! Static identifier catalogs.
//!
//! Every catalog is a module of `&str` constants declared through
//! [`id_catalog!`], which also emits an `ALL` slice of `(symbolic name, id)`
//! pairs. The alias tables are built from those slices at startup, so no
//! runtime type inspection is ever needed to enumerate the constants.

/// Declare a module of canonical-id constants plus its `ALL` enumeration.
macro_rules! id_catalog {
    (
        $(#[$meta:meta])*
        $vis:vis mod $name:ident {
            $( $(#[$cmeta:meta])* $konst:ident = $value:literal, )*
        }
    ) => {
        $(#[$meta])*
        $vis mod $name {
            $( $(#[$cmeta])* pub const $konst: &str = $value; )*

            /// Every constant in this catalog as `(symbolic name, canonical id)`.
            pub const ALL: &[(&str, &str)] = &[ $( (stringify!($konst), $value), )* ];
        }
    };
}

id_catalog! {
    /// Item templates addressable by symbolic name.
    pub mod item_tpl {
        ASSAULTRIFLE_COLT_M4A1_556X45_ASSAULT_RIFLE = "5447a9cd4bdc2dbd208b4567",
        ASSAULTRIFLE_KALASHNIKOV_AK74N_545X39_ASSAULT_RIFLE = "5644bd2b4bdc2d3b4c8b4572",
        MAGAZINE_556X45_STANAG_30RND = "55d4887d4bdc2d962f8b4570",
        MONEY_ROUBLES = "5449016a4bdc2d6f028b456f",
        MONEY_DOLLARS = "5696686a4bdc2da3298b456a",
        MONEY_EUROS = "569668774bdc2da2298b4568",
        BARTER_METAL_FUEL_TANK = "5d1b371186f774253763a656",
        BARTER_EXPEDITIONARY_FUEL_TANK = "5d1b36a186f7742523398433",
        BARTER_DOGTAG_BEAR = "59f32bb586f774757e1e8442",
        BARTER_DOGTAG_USEC = "59f32c3b86f774322e7be45e",
        CONTAINER_ITEM_CASE = "59fb042886f7746c5005a7b2",
        CONTAINER_THICC_ITEM_CASE = "5c0a840b86f7742ffa4f2482",
        CONTAINER_WEAPON_CASE = "59fb023c86f7746d0d4b423c",
        CONTAINER_DOCUMENTS_CASE = "590c60fc86f77412b13fddcf",
        LOOTCONTAINER_JACKET = "578f8778245977358849a9b5",
        LOOTCONTAINER_WEAPON_BOX = "5909d5ef86f77467974efbd8",
        POCKETS_1X4 = "627a4e6b255f7527fb05a0f6",
        POCKETS_1X4_TUE = "65e080be269cbd5c5005e529",
        INVENTORY_DEFAULT = "55d7217a4bdc2d86028b456d",
        HIDEOUTAREACONTAINER_PLACEOFFAME_STASH_1 = "63dbd45917fff4dee40fe16e",
        HIDEOUTAREACONTAINER_PLACEOFFAME_STASH_2 = "65424185a57eea37ed6562e9",
        HIDEOUTAREACONTAINER_PLACEOFFAME_STASH_3 = "6542435ea57eea37ed6562f0",
        HIDEOUTAREACONTAINER_CUSTOMIZATION = "673c7b00cbf4b984b5099181",
    }
}

id_catalog! {
    /// Item base classes (the `_parent` of a template).
    pub mod base_class {
        ITEM = "54009119af1c881c07000029",
        WEAPON = "5422acb9af1c889c16000029",
        ASSAULT_RIFLE = "5447b5f14bdc2d61278b4567",
        MAGAZINE = "5448bc234bdc2d3c308b4569",
        MONEY = "543be5dd4bdc2deb348b4569",
        BARTER_ITEM = "5448eb774bdc2d0a728b4567",
        FUEL = "5d650c3e815116009f6201d2",
        INFO = "5448ecbe4bdc2d60728b4568",
        KEY = "543be5e94bdc2df1348b4568",
        MEDS = "543be5664bdc2dd4348b4569",
        FOOD = "5448e8d04bdc2ddf718b4569",
        SIMPLE_CONTAINER = "5795f317245977243854e041",
        MOB_CONTAINER = "5448bf274bdc2dfc2f8b456a",
    }
}

id_catalog! {
    /// Handbook (trader UI) categories.
    pub mod handbook_category {
        WEAPONS = "5b5f78dc86f77409407a7f8e",
        ASSAULT_RIFLES = "5b5f78fc86f77409407a7f90",
        MAGAZINES = "5b5f754a86f774094242f19b",
        BARTER_ITEMS = "5b47574386f77428ca22b33e",
        INFO_ITEMS = "5b47574386f77428ca22b341",
        MONEY = "5b5f78b786f77447ed5636af",
        STORAGE_CONTAINERS = "5b5f6fa186f77409407a7eb7",
    }
}

id_catalog! {
    /// Stock traders.
    pub mod trader {
        MECHANIC = "5a7c2eca46aef81a7ca2145d",
        SKIER = "58330581ace78e27b8b10cee",
        PEACEKEEPER = "5935c25fb3acc3127c3d8cd9",
        THERAPIST = "54cb57776803fa99248b456e",
        PRAPOR = "54cb50c76803fa8b248b4571",
        JAEGER = "5c0647fdd443bc2504c2d371",
        RAGMAN = "5ac3b934156ae10c4430e83c",
        FENCE = "579dc571d53a0658a154fbec",
        BADGER = "bd3a8b28356d9c6509966546",
    }
}

id_catalog! {
    /// Hideout areas patched by the appliers.
    pub mod hideout_area {
        GENERATOR = "5d3b396e33c48f02b81cd9f3",
    }
}

/// Short item-template aliases that are not constant names.
pub const ITEM_TPL_SHORTHANDS: &[(&str, &str)] = &[
    ("case", item_tpl::CONTAINER_ITEM_CASE),
    ("thicc", item_tpl::CONTAINER_THICC_ITEM_CASE),
    ("weaponcase", item_tpl::CONTAINER_WEAPON_CASE),
    ("docs", item_tpl::CONTAINER_DOCUMENTS_CASE),
    ("jacket", item_tpl::LOOTCONTAINER_JACKET),
    ("weaponbox", item_tpl::LOOTCONTAINER_WEAPON_BOX),
    ("roubles", item_tpl::MONEY_ROUBLES),
    ("dollars", item_tpl::MONEY_DOLLARS),
    ("euros", item_tpl::MONEY_EUROS),
];

/// Trader display names, including the community spelling of Jaeger.
pub const TRADER_NAMES: &[(&str, &str)] = &[
    ("Mechanic", trader::MECHANIC),
    ("Skier", trader::SKIER),
    ("Peacekeeper", trader::PEACEKEEPER),
    ("Therapist", trader::THERAPIST),
    ("Prapor", trader::PRAPOR),
    ("Jaeger", trader::JAEGER),
    ("Jaegar", trader::JAEGER),
    ("Ragman", trader::RAGMAN),
    ("Fence", trader::FENCE),
    ("Badger", trader::BADGER),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::is_valid_id;

    #[test]
    fn test_catalog_enumeration_matches_constants() {
        assert!(item_tpl::ALL.contains(&("CONTAINER_ITEM_CASE", item_tpl::CONTAINER_ITEM_CASE)));
        assert_eq!(trader::ALL.len(), 9);
    }

    #[test]
    fn test_every_catalog_id_is_canonical() {
        let all = item_tpl::ALL
            .iter()
            .chain(base_class::ALL)
            .chain(handbook_category::ALL)
            .chain(trader::ALL)
            .chain(hideout_area::ALL)
            .chain(ITEM_TPL_SHORTHANDS)
            .chain(TRADER_NAMES);

        for (name, id) in all {
            assert!(is_valid_id(id), "{} maps to non-canonical id {}", name, id);
        }
    }
}
