//! Herd module: the cattle-care data model.
//!
//! Eight document collections (users, farms, cows and the per-cow reports
//! and events) with their pre-save validation rules. [`Herd`] bundles one
//! [`DocOps`] per collection over a shared [`Database`].

pub mod model;

use cattlecare_core::ServiceError;
use cattlecare_store::{Database, DocOps, Document, Ref};
use tracing::debug;

use model::{Breeding, Cow, Farm, Feed, HealthReport, MilkingEvent, User, VideoAnalysis};

/// Every collection name, in dependency order (referenced before referencing).
pub const COLLECTIONS: [&str; 8] = [
    User::COLLECTION,
    Farm::COLLECTION,
    Cow::COLLECTION,
    HealthReport::COLLECTION,
    MilkingEvent::COLLECTION,
    Feed::COLLECTION,
    Breeding::COLLECTION,
    VideoAnalysis::COLLECTION,
];

/// Typed access to all herd collections.
#[derive(Clone)]
pub struct Herd {
    db: Database,
    pub users: DocOps<User>,
    pub farms: DocOps<Farm>,
    pub cows: DocOps<Cow>,
    pub health_reports: DocOps<HealthReport>,
    pub milking_events: DocOps<MilkingEvent>,
    pub feeds: DocOps<Feed>,
    pub breeding: DocOps<Breeding>,
    pub video_analyses: DocOps<VideoAnalysis>,
}

/// A cow's history vectors with every reference resolved.
#[derive(Debug, Clone)]
pub struct CowHistory {
    pub health_reports: Vec<HealthReport>,
    pub feed_data: Vec<Feed>,
    pub breeding_history: Vec<Breeding>,
    pub milking_history: Vec<MilkingEvent>,
}

impl Herd {
    pub fn new(db: Database) -> Self {
        Self {
            users: db.collection(),
            farms: db.collection(),
            cows: db.collection(),
            health_reports: db.collection(),
            milking_events: db.collection(),
            feeds: db.collection(),
            breeding: db.collection(),
            video_analyses: db.collection(),
            db,
        }
    }

    /// Open the store named by a connection string (`redb://<path>` or `memory://`).
    pub fn connect(connection: &str) -> Result<Self, ServiceError> {
        Ok(Self::new(Database::connect(connection)?))
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Dereference any typed reference.
    pub fn resolve<T: Document>(&self, reference: &Ref<T>) -> Result<T, ServiceError> {
        self.db.resolve(reference)
    }

    /// Resolve all of a cow's history references.
    ///
    /// Fails with `NotFound` on the first reference whose target was deleted.
    pub fn cow_history(&self, cow: &Cow) -> Result<CowHistory, ServiceError> {
        debug!(cow = ?cow.id, "resolving cow history");
        Ok(CowHistory {
            health_reports: self.health_reports.resolve_all(&cow.health_reports)?,
            feed_data: self.feeds.resolve_all(&cow.feed_data)?,
            breeding_history: self.breeding.resolve_all(&cow.breeding_history)?,
            milking_history: self.milking_events.resolve_all(&cow.milking_history)?,
        })
    }

    /// Document count per collection, in [`COLLECTIONS`] order.
    pub fn counts(&self) -> Result<Vec<(&'static str, usize)>, ServiceError> {
        Ok(vec![
            (User::COLLECTION, self.users.count()?),
            (Farm::COLLECTION, self.farms.count()?),
            (Cow::COLLECTION, self.cows.count()?),
            (HealthReport::COLLECTION, self.health_reports.count()?),
            (MilkingEvent::COLLECTION, self.milking_events.count()?),
            (Feed::COLLECTION, self.feeds.count()?),
            (Breeding::COLLECTION, self.breeding.count()?),
            (VideoAnalysis::COLLECTION, self.video_analyses.count()?),
        ])
    }
}
