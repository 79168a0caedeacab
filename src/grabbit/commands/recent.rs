use chrono::Duration;

use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::ItemStore;

/// Items bought within the last `days` days, boundary inclusive.
pub fn run<S: ItemStore>(store: &S, days: u32) -> Result<CmdResult> {
    let items = store.recently_bought(Duration::days(i64::from(days)))?;
    Ok(CmdResult::ok().with_listed_items(items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use chrono::Utc;

    #[test]
    fn includes_recent_and_excludes_old_purchases() {
        let now = Utc::now();
        let fixture = StoreFixture::new()
            .with_bought_item("yesterday", now - Duration::days(1))
            .with_bought_item("last month", now - Duration::days(30));

        let result = run(&fixture.store, 7).unwrap();
        assert_eq!(result.count(), 1);
        assert_eq!(result.listed_items[0].name, "yesterday");
    }
}
