//! The process-wide alias catalog; kept in its own binary so no other test
//! installs a catalog first.

use graft::catalog::trader;
use graft::{AliasCatalog, Overlay};

const ARTEM: &str = "cccccccccccccccccccccccc";

#[test]
fn test_first_install_wins() {
    assert!(AliasCatalog::global().is_none());
    assert!(Overlay::installed().is_none());

    let custom = AliasCatalog::builder().with_trader("Artem", ARTEM).build();
    let installed = custom.install().unwrap();
    assert_eq!(installed.traders.resolve("artem").unwrap(), ARTEM);

    let rejected = AliasCatalog::builtin().install().unwrap_err();
    assert!(rejected.traders.resolve("artem").is_err());

    let global = AliasCatalog::global().unwrap();
    assert_eq!(global.traders.resolve("artem").unwrap(), ARTEM);
    assert_eq!(global.traders.resolve("mechanic").unwrap(), trader::MECHANIC);

    let overlay = Overlay::installed().unwrap();
    assert_eq!(overlay.aliases().traders.resolve("ARTEM").unwrap(), ARTEM);
}
