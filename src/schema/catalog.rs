use std::fmt;

use super::fields::{enumerated, optional, required, DefaultValue, FieldSpec};

/// Every resource kind the site manages.
///
/// Each kind maps to exactly one collection in one logical database;
/// the mapping and its field rules live in the static descriptors below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Journal,
    Conference,
    Book,
    Workshop,
    Patent,
    Semester,
    Student,
    GraduateStudent,
    Project,
    Achievement,
    Event,
    News,
    Announcement,
    ResearchArea,
    Activity,
    AwardOrTalk,
    GalleryItem,
}

/// Static description of where a kind lives and how it is validated.
#[derive(Debug)]
pub struct ResourceDescriptor {
    pub kind: ResourceKind,
    pub database: &'static str,
    pub collection: &'static str,
    pub fields: &'static [FieldSpec],
    /// Whether creates assign a per-collection serial number.
    pub serial: bool,
    /// Field the default listing is sorted by, always descending.
    pub order_by: &'static str,
    /// Text field used for case-insensitive substring lookup.
    pub search_field: &'static str,
    /// Whether the repository maintains createdAt/updatedAt.
    pub timestamps: bool,
}

static JOURNAL: ResourceDescriptor = ResourceDescriptor {
    kind: ResourceKind::Journal,
    database: "Paper",
    collection: "journals",
    fields: &[
        required("title"),
        required("authors"),
        required("journal"),
        required("publishedOn"),
        optional("volume", DefaultValue::Null),
        optional("pages", DefaultValue::EmptyText),
        optional("DOI", DefaultValue::EmptyText),
    ],
    serial: true,
    order_by: "serialno",
    search_field: "title",
    timestamps: false,
};

static CONFERENCE: ResourceDescriptor = ResourceDescriptor {
    kind: ResourceKind::Conference,
    database: "Paper",
    collection: "conferences",
    fields: &[
        required("title"),
        required("authors"),
        required("conference"),
        required("publishedOn"),
        optional("location", DefaultValue::EmptyText),
        optional("pages", DefaultValue::EmptyText),
        optional("DOI", DefaultValue::EmptyText),
    ],
    serial: true,
    order_by: "serialno",
    search_field: "title",
    timestamps: false,
};

static BOOK: ResourceDescriptor = ResourceDescriptor {
    kind: ResourceKind::Book,
    database: "Paper",
    collection: "books",
    fields: &[
        required("title"),
        required("authors"),
        required("publisher"),
        required("year"),
        optional("ISBN", DefaultValue::EmptyText),
        optional("edition", DefaultValue::Null),
    ],
    serial: true,
    order_by: "serialno",
    search_field: "title",
    timestamps: false,
};

static WORKSHOP: ResourceDescriptor = ResourceDescriptor {
    kind: ResourceKind::Workshop,
    database: "Paper",
    collection: "workshops",
    fields: &[
        required("title"),
        required("authors"),
        required("workshop"),
        required("publishedOn"),
        optional("pages", DefaultValue::EmptyText),
        optional("DOI", DefaultValue::EmptyText),
    ],
    serial: true,
    order_by: "serialno",
    search_field: "title",
    timestamps: false,
};

static PATENT: ResourceDescriptor = ResourceDescriptor {
    kind: ResourceKind::Patent,
    database: "Paper",
    collection: "patents",
    fields: &[
        required("title"),
        required("inventors"),
        enumerated("status", &["Granted", "Filed"]),
        required("filedOn"),
        optional("applicationNo", DefaultValue::EmptyText),
        optional("grantedOn", DefaultValue::Null),
    ],
    serial: true,
    order_by: "serialno",
    search_field: "title",
    timestamps: false,
};

static SEMESTER: ResourceDescriptor = ResourceDescriptor {
    kind: ResourceKind::Semester,
    database: "Teachings",
    collection: "semesters",
    fields: &[
        required("name"),
        required("year"),
        optional("courses", DefaultValue::EmptyList),
    ],
    serial: false,
    order_by: "year",
    search_field: "name",
    timestamps: true,
};

static STUDENT: ResourceDescriptor = ResourceDescriptor {
    kind: ResourceKind::Student,
    database: "People",
    collection: "students",
    fields: &[
        required("name"),
        required("course"),
        required("enrolledOn"),
        optional("email", DefaultValue::EmptyText),
        optional("photo", DefaultValue::EmptyText),
    ],
    serial: false,
    order_by: "enrolledOn",
    search_field: "name",
    timestamps: true,
};

static GRADUATE_STUDENT: ResourceDescriptor = ResourceDescriptor {
    kind: ResourceKind::GraduateStudent,
    database: "People",
    collection: "graduate_students",
    fields: &[
        required("name"),
        required("degree"),
        required("graduatedIn"),
        optional("thesis", DefaultValue::EmptyText),
        optional("currentPosition", DefaultValue::EmptyText),
    ],
    serial: false,
    order_by: "graduatedIn",
    search_field: "name",
    timestamps: true,
};

static PROJECT: ResourceDescriptor = ResourceDescriptor {
    kind: ResourceKind::Project,
    database: "Highlights",
    collection: "projects",
    fields: &[
        required("title"),
        required("investigators"),
        enumerated("role", &["PI", "Co-PI"]),
        enumerated("category", &["Ongoing", "Funded"]),
        required("startDate"),
        optional("sponsor", DefaultValue::EmptyText),
        optional("endDate", DefaultValue::Null),
        optional("amount", DefaultValue::Null),
    ],
    serial: false,
    order_by: "startDate",
    search_field: "title",
    timestamps: true,
};

static ACHIEVEMENT: ResourceDescriptor = ResourceDescriptor {
    kind: ResourceKind::Achievement,
    database: "Highlights",
    collection: "achievements",
    fields: &[
        required("title"),
        required("achievedBy"),
        required("date"),
        optional("description", DefaultValue::EmptyText),
    ],
    serial: false,
    order_by: "date",
    search_field: "title",
    timestamps: true,
};

static EVENT: ResourceDescriptor = ResourceDescriptor {
    kind: ResourceKind::Event,
    database: "Highlights",
    collection: "events",
    fields: &[
        required("title"),
        required("date"),
        optional("venue", DefaultValue::EmptyText),
        optional("description", DefaultValue::EmptyText),
    ],
    serial: false,
    order_by: "date",
    search_field: "title",
    timestamps: true,
};

static NEWS: ResourceDescriptor = ResourceDescriptor {
    kind: ResourceKind::News,
    database: "Highlights",
    collection: "news",
    fields: &[
        required("title"),
        required("date"),
        required("content"),
        optional("link", DefaultValue::EmptyText),
    ],
    serial: false,
    order_by: "date",
    search_field: "title",
    timestamps: true,
};

static ANNOUNCEMENT: ResourceDescriptor = ResourceDescriptor {
    kind: ResourceKind::Announcement,
    database: "Highlights",
    collection: "announcements",
    fields: &[
        required("title"),
        required("date"),
        required("content"),
        optional("expiresOn", DefaultValue::Null),
    ],
    serial: false,
    order_by: "date",
    search_field: "title",
    timestamps: true,
};

static RESEARCH_AREA: ResourceDescriptor = ResourceDescriptor {
    kind: ResourceKind::ResearchArea,
    database: "Highlights",
    collection: "research_areas",
    fields: &[
        required("name"),
        required("description"),
        required("addedOn"),
        optional("image", DefaultValue::EmptyText),
    ],
    serial: false,
    order_by: "addedOn",
    search_field: "name",
    timestamps: true,
};

static ACTIVITY: ResourceDescriptor = ResourceDescriptor {
    kind: ResourceKind::Activity,
    database: "Highlights",
    collection: "activities",
    fields: &[
        required("name"),
        required("date"),
        optional("details", DefaultValue::EmptyText),
    ],
    serial: false,
    order_by: "date",
    search_field: "name",
    timestamps: true,
};

static AWARD_OR_TALK: ResourceDescriptor = ResourceDescriptor {
    kind: ResourceKind::AwardOrTalk,
    database: "Highlights",
    collection: "awards_and_talks",
    fields: &[
        required("title"),
        enumerated("category", &["Award", "Talk"]),
        required("date"),
        optional("venue", DefaultValue::EmptyText),
    ],
    serial: false,
    order_by: "date",
    search_field: "title",
    timestamps: true,
};

static GALLERY_ITEM: ResourceDescriptor = ResourceDescriptor {
    kind: ResourceKind::GalleryItem,
    database: "Highlights",
    collection: "gallery",
    fields: &[
        required("caption"),
        required("imageUrl"),
        required("takenOn"),
        optional("event", DefaultValue::EmptyText),
    ],
    serial: false,
    order_by: "takenOn",
    search_field: "caption",
    timestamps: true,
};

impl ResourceKind {
    pub const ALL: [ResourceKind; 17] = [
        ResourceKind::Journal,
        ResourceKind::Conference,
        ResourceKind::Book,
        ResourceKind::Workshop,
        ResourceKind::Patent,
        ResourceKind::Semester,
        ResourceKind::Student,
        ResourceKind::GraduateStudent,
        ResourceKind::Project,
        ResourceKind::Achievement,
        ResourceKind::Event,
        ResourceKind::News,
        ResourceKind::Announcement,
        ResourceKind::ResearchArea,
        ResourceKind::Activity,
        ResourceKind::AwardOrTalk,
        ResourceKind::GalleryItem,
    ];

    /// Parse a kind from its kebab-case route name (case-insensitive).
    pub fn from_str_ci(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "journal" => Some(ResourceKind::Journal),
            "conference" => Some(ResourceKind::Conference),
            "book" => Some(ResourceKind::Book),
            "workshop" => Some(ResourceKind::Workshop),
            "patent" => Some(ResourceKind::Patent),
            "semester" => Some(ResourceKind::Semester),
            "student" => Some(ResourceKind::Student),
            "graduate-student" => Some(ResourceKind::GraduateStudent),
            "project" => Some(ResourceKind::Project),
            "achievement" => Some(ResourceKind::Achievement),
            "event" => Some(ResourceKind::Event),
            "news" => Some(ResourceKind::News),
            "announcement" => Some(ResourceKind::Announcement),
            "research-area" => Some(ResourceKind::ResearchArea),
            "activity" => Some(ResourceKind::Activity),
            "award-or-talk" => Some(ResourceKind::AwardOrTalk),
            "gallery-item" => Some(ResourceKind::GalleryItem),
            _ => None,
        }
    }

    pub fn descriptor(self) -> &'static ResourceDescriptor {
        match self {
            ResourceKind::Journal => &JOURNAL,
            ResourceKind::Conference => &CONFERENCE,
            ResourceKind::Book => &BOOK,
            ResourceKind::Workshop => &WORKSHOP,
            ResourceKind::Patent => &PATENT,
            ResourceKind::Semester => &SEMESTER,
            ResourceKind::Student => &STUDENT,
            ResourceKind::GraduateStudent => &GRADUATE_STUDENT,
            ResourceKind::Project => &PROJECT,
            ResourceKind::Achievement => &ACHIEVEMENT,
            ResourceKind::Event => &EVENT,
            ResourceKind::News => &NEWS,
            ResourceKind::Announcement => &ANNOUNCEMENT,
            ResourceKind::ResearchArea => &RESEARCH_AREA,
            ResourceKind::Activity => &ACTIVITY,
            ResourceKind::AwardOrTalk => &AWARD_OR_TALK,
            ResourceKind::GalleryItem => &GALLERY_ITEM,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceKind::Journal => "journal",
            ResourceKind::Conference => "conference",
            ResourceKind::Book => "book",
            ResourceKind::Workshop => "workshop",
            ResourceKind::Patent => "patent",
            ResourceKind::Semester => "semester",
            ResourceKind::Student => "student",
            ResourceKind::GraduateStudent => "graduate-student",
            ResourceKind::Project => "project",
            ResourceKind::Achievement => "achievement",
            ResourceKind::Event => "event",
            ResourceKind::News => "news",
            ResourceKind::Announcement => "announcement",
            ResourceKind::ResearchArea => "research-area",
            ResourceKind::Activity => "activity",
            ResourceKind::AwardOrTalk => "award-or-talk",
            ResourceKind::GalleryItem => "gallery-item",
        };
        write!(f, "{}", name)
    }
}
