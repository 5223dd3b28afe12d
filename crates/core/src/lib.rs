//! Foundation types shared across the teller workspace.
//!
//! ## Identity
//!
//! - [`ID`] — phantom-typed UUID wrapper for entity keys
//! - [`Unique`] — identity trait for persisted entities
//!
//! ## Runtime
//!
//! - [`log()`] — logger bootstrap for server binaries

use std::cmp::Ordering;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::hash::Hash;
use std::hash::Hasher;
use std::marker::PhantomData;

/// Identity trait for persisted domain entities.
///
/// `T` defaults to `Self` so entities simply say who they are; conversions
/// and projections can still declare which entity their key belongs to.
pub trait Unique<T = Self> {
    fn id(&self) -> ID<T>;
}

/// Typed entity key over `uuid::Uuid`.
///
/// The phantom parameter keeps keys of different entities from mixing at
/// compile time even though every key is the same 128 bits underneath.
pub struct ID<T> {
    inner: uuid::Uuid,
    marker: PhantomData<T>,
}

impl<T> ID<T> {
    /// The underlying UUID, for handing to database drivers.
    pub fn inner(&self) -> uuid::Uuid {
        self.inner
    }
}

/// Fresh keys are UUIDv7, so creation order survives into key order.
impl<T> Default for ID<T> {
    fn default() -> Self {
        Self::from(uuid::Uuid::now_v7())
    }
}

impl<T> From<uuid::Uuid> for ID<T> {
    fn from(inner: uuid::Uuid) -> Self {
        Self {
            inner,
            marker: PhantomData,
        }
    }
}

impl<T> From<ID<T>> for uuid::Uuid {
    fn from(id: ID<T>) -> Self {
        id.inner
    }
}

// Manual impls: deriving would bound T, and marker types never carry
// these traits themselves.
impl<T> Copy for ID<T> {}
impl<T> Clone for ID<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Eq for ID<T> {}
impl<T> PartialEq for ID<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}
impl<T> Ord for ID<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<T> PartialOrd for ID<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<T> Hash for ID<T> {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        self.inner.hash(state);
    }
}
impl<T> Debug for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ID").field(&self.inner).finish()
    }
}
impl<T> Display for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.inner, f)
    }
}

/// Initializes logging for server binaries: INFO to the terminal (DEBUG
/// when `debug` is set), DEBUG to a timestamped file under `logs/`.
#[cfg(feature = "server")]
pub fn log(debug: bool) {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let level = if debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        level,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Widget;

    #[test]
    fn fresh_ids_differ() {
        assert_ne!(ID::<Widget>::default(), ID::<Widget>::default());
    }

    #[test]
    fn ids_roundtrip_through_uuid() {
        let id = ID::<Widget>::default();
        assert_eq!(id, ID::from(id.inner()));
    }
}
