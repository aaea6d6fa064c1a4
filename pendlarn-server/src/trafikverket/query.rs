//! XML query bodies for the Trafikverket data API.
//!
//! Upstream takes a `REQUEST` document holding a `LOGIN` element with the
//! API key and one or more `QUERY` elements, each with a `FILTER` tree of
//! `AND`/`OR` groups and `EQ`/`GT`/`LT`/`IN` comparisons.
//!
//! Queries are built as values and serialized by [`Request::to_xml`], which
//! escapes every attribute value and text node. No key, station code or
//! identifier can change the shape of the document.

use crate::domain::{Station, TimeWindow, TrainIdent};

/// Schema version of the `TrainAnnouncement` object we decode.
pub const SCHEMA_VERSION: &str = "1.8";

const OBJECT_TYPE: &str = "TrainAnnouncement";
const ORDER_BY: &str = "AdvertisedTimeAtLocation";

const ACTIVITY_TYPE: &str = "ActivityType";
const ADVERTISED_TIME: &str = "AdvertisedTimeAtLocation";
const LOCATION: &str = "LocationSignature";
const TRAIN_IDENT: &str = "AdvertisedTrainIdent";

/// `ActivityType` values.
const DEPARTURE: &str = "Avgang";
const ARRIVAL: &str = "Ankomst";

/// Fields returned by the detail phase.
const DETAIL_FIELDS: [&str; 7] = [
    "LocationSignature",
    "AdvertisedTimeAtLocation",
    "AdvertisedTrainIdent",
    "Operator",
    "Deviation",
    "OtherInformation",
    "TrackAtLocation",
];

/// Comparison operators of the filter grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Eq,
    Gt,
    Lt,
    In,
}

impl Op {
    fn tag(self) -> &'static str {
        match self {
            Op::Eq => "EQ",
            Op::Gt => "GT",
            Op::Lt => "LT",
            Op::In => "IN",
        }
    }
}

/// A node of a query's `FILTER` tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    And(Vec<Filter>),
    Or(Vec<Filter>),
    Compare {
        op: Op,
        name: &'static str,
        value: String,
    },
}

impl Filter {
    pub fn eq(name: &'static str, value: impl Into<String>) -> Self {
        Filter::Compare {
            op: Op::Eq,
            name,
            value: value.into(),
        }
    }

    pub fn gt(name: &'static str, value: impl Into<String>) -> Self {
        Filter::Compare {
            op: Op::Gt,
            name,
            value: value.into(),
        }
    }

    pub fn lt(name: &'static str, value: impl Into<String>) -> Self {
        Filter::Compare {
            op: Op::Lt,
            name,
            value: value.into(),
        }
    }

    /// Set membership. Upstream takes the members comma-separated.
    pub fn is_in<'a>(name: &'static str, values: impl IntoIterator<Item = &'a str>) -> Self {
        Filter::Compare {
            op: Op::In,
            name,
            value: values.into_iter().collect::<Vec<_>>().join(","),
        }
    }

    fn write(&self, out: &mut XmlWriter) {
        match self {
            Filter::And(children) => {
                out.open("AND", &[]);
                for child in children {
                    child.write(out);
                }
                out.close("AND");
            }
            Filter::Or(children) => {
                out.open("OR", &[]);
                for child in children {
                    child.write(out);
                }
                out.close("OR");
            }
            Filter::Compare { op, name, value } => {
                out.empty(op.tag(), &[("name", *name), ("value", value.as_str())]);
            }
        }
    }
}

/// One `QUERY` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub includes: Vec<&'static str>,
    pub filter: Filter,
}

/// A complete request document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request<'a> {
    pub api_key: &'a str,
    pub query: Query,
}

impl Request<'_> {
    /// Serialize to the XML upstream expects.
    pub fn to_xml(&self) -> String {
        let mut out = XmlWriter::default();
        out.open("REQUEST", &[]);
        out.empty("LOGIN", &[("authenticationkey", self.api_key)]);
        out.open(
            "QUERY",
            &[
                ("objecttype", OBJECT_TYPE),
                ("orderby", ORDER_BY),
                ("schemaversion", SCHEMA_VERSION),
            ],
        );
        for field in &self.query.includes {
            out.text_element("INCLUDE", field);
        }
        out.open("FILTER", &[]);
        self.query.filter.write(&mut out);
        out.close("FILTER");
        out.close("QUERY");
        out.close("REQUEST");
        out.finish()
    }
}

/// Filter for trains running from `from` to `to` within the window.
///
/// Matches departures from `from` heading to `to` (directly or via) and
/// arrivals at `to` coming from `from` (directly or via). The second branch
/// is the first with the roles of the endpoints swapped.
pub fn list_filter(from: &Station, to: &Station, window: &TimeWindow) -> Filter {
    Filter::And(vec![
        Filter::gt(ADVERTISED_TIME, window.after_param()),
        Filter::lt(ADVERTISED_TIME, window.before_param()),
        Filter::Or(vec![
            Filter::And(vec![
                Filter::eq(ACTIVITY_TYPE, DEPARTURE),
                Filter::eq(LOCATION, from.as_str()),
                Filter::Or(vec![
                    Filter::eq("ToLocation.LocationName", to.as_str()),
                    Filter::eq("ViaToLocation.LocationName", to.as_str()),
                ]),
            ]),
            Filter::And(vec![
                Filter::eq(ACTIVITY_TYPE, ARRIVAL),
                Filter::eq(LOCATION, to.as_str()),
                Filter::Or(vec![
                    Filter::eq("FromLocation.LocationName", from.as_str()),
                    Filter::eq("ViaFromLocation.LocationName", from.as_str()),
                ]),
            ]),
        ]),
    ])
}

/// Filter for departures from `from` within the window by the given trains.
pub fn detail_filter(from: &Station, idents: &[TrainIdent], window: &TimeWindow) -> Filter {
    Filter::And(vec![
        Filter::eq(ACTIVITY_TYPE, DEPARTURE),
        Filter::eq(LOCATION, from.as_str()),
        Filter::gt(ADVERTISED_TIME, window.after_param()),
        Filter::lt(ADVERTISED_TIME, window.before_param()),
        Filter::is_in(TRAIN_IDENT, idents.iter().map(TrainIdent::as_str)),
    ])
}

/// Body of the list phase: identifiers of trains stopping at either end.
pub fn build_list_query(
    api_key: &str,
    from: &Station,
    to: &Station,
    window: &TimeWindow,
) -> String {
    Request {
        api_key,
        query: Query {
            includes: vec![TRAIN_IDENT],
            filter: list_filter(from, to, window),
        },
    }
    .to_xml()
}

/// Body of the detail phase: full announcements for the given trains,
/// ordered by advertised time.
///
/// An empty identifier set is sent as-is; upstream answers with no records.
pub fn build_detail_query(
    api_key: &str,
    from: &Station,
    idents: &[TrainIdent],
    window: &TimeWindow,
) -> String {
    Request {
        api_key,
        query: Query {
            includes: DETAIL_FIELDS.to_vec(),
            filter: detail_filter(from, idents, window),
        },
    }
    .to_xml()
}

/// Indenting XML writer. Attribute values and text are always escaped.
#[derive(Default)]
struct XmlWriter {
    buf: String,
    depth: usize,
}

impl XmlWriter {
    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.buf.push('\t');
        }
    }

    fn start_tag(&mut self, tag: &str, attrs: &[(&str, &str)]) {
        self.indent();
        self.buf.push('<');
        self.buf.push_str(tag);
        for (name, value) in attrs {
            self.buf.push(' ');
            self.buf.push_str(name);
            self.buf.push_str("=\"");
            escape_into(value, &mut self.buf);
            self.buf.push('"');
        }
    }

    fn open(&mut self, tag: &str, attrs: &[(&str, &str)]) {
        self.start_tag(tag, attrs);
        self.buf.push_str(">\n");
        self.depth += 1;
    }

    fn close(&mut self, tag: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.indent();
        self.buf.push_str("</");
        self.buf.push_str(tag);
        self.buf.push_str(">\n");
    }

    fn empty(&mut self, tag: &str, attrs: &[(&str, &str)]) {
        self.start_tag(tag, attrs);
        self.buf.push_str("/>\n");
    }

    fn text_element(&mut self, tag: &str, text: &str) {
        self.start_tag(tag, &[]);
        self.buf.push('>');
        escape_into(text, &mut self.buf);
        self.buf.push_str("</");
        self.buf.push_str(tag);
        self.buf.push_str(">\n");
    }

    fn finish(self) -> String {
        self.buf
    }
}

fn escape_into(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
}
