//! iCalendar component types (RFC 5545 §3.4-3.6).

use std::fmt;

use super::Property;

/// Component kinds known by name. Anything else is [`ComponentKind::Unknown`]
/// and keeps its written name on the [`Component`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Calendar,
    Event,
    Todo,
    Journal,
    FreeBusy,
    Timezone,
    Alarm,
    /// STANDARD and DAYLIGHT sub-components of VTIMEZONE.
    Standard,
    Daylight,
    /// RFC 7953 VAVAILABILITY and its AVAILABLE sub-component.
    Availability,
    Available,
    /// X- or IANA component.
    Unknown,
}

const KIND_NAMES: [(ComponentKind, &str); 11] = [
    (ComponentKind::Calendar, "VCALENDAR"),
    (ComponentKind::Event, "VEVENT"),
    (ComponentKind::Todo, "VTODO"),
    (ComponentKind::Journal, "VJOURNAL"),
    (ComponentKind::FreeBusy, "VFREEBUSY"),
    (ComponentKind::Timezone, "VTIMEZONE"),
    (ComponentKind::Alarm, "VALARM"),
    (ComponentKind::Standard, "STANDARD"),
    (ComponentKind::Daylight, "DAYLIGHT"),
    (ComponentKind::Availability, "VAVAILABILITY"),
    (ComponentKind::Available, "AVAILABLE"),
];

impl ComponentKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        KIND_NAMES
            .iter()
            .find(|(kind, _)| *kind == self)
            .map_or("X-UNKNOWN", |(_, name)| name)
    }

    /// Looks a component name up, ignoring case.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        KIND_NAMES
            .iter()
            .find(|(_, name)| name.eq_ignore_ascii_case(s))
            .map_or(Self::Unknown, |(kind, _)| *kind)
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An iCalendar component: named, with ordered properties and
/// sub-components.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Component {
    pub kind: Option<ComponentKind>,
    /// Upper-cased component name; the only identity X-components have.
    pub name: String,
    pub properties: Vec<Property>,
    pub children: Vec<Component>,
}

impl Component {
    #[must_use]
    pub fn new(kind: ComponentKind) -> Self {
        Self {
            kind: Some(kind),
            name: kind.as_str().to_string(),
            ..Self::default()
        }
    }

    /// Creates a component from any name, resolving its kind.
    #[must_use]
    pub fn custom(name: impl Into<String>) -> Self {
        let name = name.into().to_ascii_uppercase();
        Self {
            kind: Some(ComponentKind::parse(&name)),
            name,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn calendar() -> Self {
        Self::new(ComponentKind::Calendar)
    }

    #[must_use]
    pub fn event() -> Self {
        Self::new(ComponentKind::Event)
    }

    #[must_use]
    pub fn alarm() -> Self {
        Self::new(ComponentKind::Alarm)
    }

    pub fn add_property(&mut self, prop: Property) {
        self.properties.push(prop);
    }

    pub fn add_child(&mut self, child: Component) {
        self.children.push(child);
    }

    /// First property with the given name (case-insensitive).
    #[must_use]
    pub fn get_property(&self, name: &str) -> Option<&Property> {
        self.properties
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Every property with the given name, in order.
    pub fn properties_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Property> {
        self.properties
            .iter()
            .filter(move |p| p.name.eq_ignore_ascii_case(name))
    }

    /// Text of the first property with the given name.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get_property(name)?.as_text()
    }

    /// Sub-components of the given kind, in order.
    pub fn children_of_kind(&self, kind: ComponentKind) -> impl Iterator<Item = &Component> {
        self.children.iter().filter(move |c| c.kind == Some(kind))
    }
}

/// A parsed document whose root is a VCALENDAR.
#[derive(Debug, Clone, PartialEq)]
pub struct ICalendar {
    pub root: Component,
}

impl ICalendar {
    /// Creates a VCALENDAR carrying VERSION and PRODID.
    #[must_use]
    pub fn new(prodid: impl Into<String>) -> Self {
        let mut root = Component::calendar();
        root.add_property(Property::text("VERSION", "2.0"));
        root.add_property(Property::text("PRODID", prodid));
        Self { root }
    }

    pub fn add_component(&mut self, component: Component) {
        self.root.add_child(component);
    }

    #[must_use]
    pub fn into_root(self) -> Component {
        self.root
    }
}
