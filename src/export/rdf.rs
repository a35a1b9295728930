use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;
use std::str::FromStr;
use tracing::info;

use crate::error::GraphError;
use crate::graph::{EdgeType, KnowledgeGraph, NodeType};

pub const DEFAULT_BASE_URI: &str = "http://example.org/biokg/";

const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
const RDFS_NS: &str = "http://www.w3.org/2000/01/rdf-schema#";
const OBO_NS: &str = "http://purl.obolibrary.org/obo/";
const SCHEMA_NS: &str = "http://schema.org/";

/// RDF serialization syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RdfFormat {
    #[default]
    Turtle,
    Xml,
    N3,
    NTriples,
}

impl RdfFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            RdfFormat::Turtle => "turtle",
            RdfFormat::Xml => "xml",
            RdfFormat::N3 => "n3",
            RdfFormat::NTriples => "nt",
        }
    }
}

impl FromStr for RdfFormat {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "turtle" | "ttl" => Ok(RdfFormat::Turtle),
            "xml" | "rdf/xml" | "rdfxml" => Ok(RdfFormat::Xml),
            "n3" => Ok(RdfFormat::N3),
            "nt" | "ntriples" | "n-triples" => Ok(RdfFormat::NTriples),
            _ => Err(GraphError::UnsupportedFormat(s.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RdfOptions {
    pub format: RdfFormat,
    pub base_uri: String,
}

impl Default for RdfOptions {
    fn default() -> Self {
        Self {
            format: RdfFormat::Turtle,
            base_uri: DEFAULT_BASE_URI.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Namespace {
    Rdf,
    Rdfs,
    Obo,
    Schema,
    Biokg,
}

impl Namespace {
    fn prefix(&self) -> &'static str {
        match self {
            Namespace::Rdf => "rdf",
            Namespace::Rdfs => "rdfs",
            Namespace::Obo => "obo",
            Namespace::Schema => "schema",
            Namespace::Biokg => "biokg",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Predicate {
    ns: Namespace,
    local: String,
}

impl Predicate {
    fn new(ns: Namespace, local: impl Into<String>) -> Self {
        Self {
            ns,
            local: local.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Term {
    Iri(String),
    Literal(String),
}

/// Prefix map of one export: the fixed vocabularies plus the base namespaces
struct Prefixes {
    base: String,
    vocab: String,
}

impl Prefixes {
    fn new(base_uri: &str) -> Self {
        Self {
            base: base_uri.to_string(),
            vocab: format!("{}vocab/", base_uri),
        }
    }

    fn namespace_iri(&self, ns: Namespace) -> &str {
        match ns {
            Namespace::Rdf => RDF_NS,
            Namespace::Rdfs => RDFS_NS,
            Namespace::Obo => OBO_NS,
            Namespace::Schema => SCHEMA_NS,
            Namespace::Biokg => &self.vocab,
        }
    }

    fn expand(&self, predicate: &Predicate) -> String {
        format!("{}{}", self.namespace_iri(predicate.ns), predicate.local)
    }

    /// `(prefix, namespace)` pairs in declaration order
    fn declarations(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("base", self.base.as_str()),
            ("biokg", self.vocab.as_str()),
            ("obo", OBO_NS),
            ("rdf", RDF_NS),
            ("rdfs", RDFS_NS),
            ("schema", SCHEMA_NS),
        ]
    }

    /// Prefixed name for `iri` when one of the namespaces covers it
    fn compact(&self, iri: &str) -> Option<String> {
        let mut best: Option<(&str, &str)> = None;
        for (prefix, ns) in self.declarations() {
            if let Some(local) = iri.strip_prefix(ns) {
                if is_simple_local(local) && best.map_or(true, |(_, b)| ns.len() > b.len()) {
                    best = Some((prefix, ns));
                }
            }
        }
        best.map(|(prefix, ns)| format!("{}:{}", prefix, &iri[ns.len()..]))
    }
}

fn is_simple_local(local: &str) -> bool {
    let mut chars = local.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphanumeric() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Property keys become vocabulary terms; anything outside `[A-Za-z0-9_-]`
/// is replaced so the term is also a valid XML element name.
fn vocab_local(key: &str) -> String {
    let mut local: String = key
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if !local.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_') {
        local.insert(0, '_');
    }
    local
}

/// Percent-encode characters that may not appear in an IRI
fn escape_iri(iri: &str) -> String {
    let mut escaped = String::with_capacity(iri.len());
    for c in iri.chars() {
        if c.is_control() || c == ' ' || "<>\"{}|^`\\".contains(c) {
            let mut buf = [0u8; 4];
            for byte in c.encode_utf8(&mut buf).bytes() {
                let _ = write!(escaped, "%{:02X}", byte);
            }
        } else {
            escaped.push(c);
        }
    }
    escaped
}

fn escape_literal(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 2);
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escape markup characters and drop characters XML 1.0 cannot carry at all
/// (C0 controls other than tab, LF and CR, plus U+FFFE and U+FFFF)
fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '\t' | '\n' | '\r' => escaped.push(c),
            '\u{0}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}' => {}
            _ => escaped.push(c),
        }
    }
    escaped
}

fn node_type_class(node_type: NodeType) -> Predicate {
    let (ns, local) = match node_type {
        NodeType::Disease => (Namespace::Obo, "DOID_4"),
        NodeType::Gene => (Namespace::Schema, "Gene"),
        NodeType::Protein => (Namespace::Schema, "Protein"),
        NodeType::Pathway => (Namespace::Obo, "PW_0000001"),
        NodeType::GoTerm => (Namespace::Obo, "GO_0008150"),
        NodeType::Compound => (Namespace::Schema, "ChemicalSubstance"),
        NodeType::Drug => (Namespace::Schema, "Drug"),
        NodeType::Reaction => (Namespace::Obo, "GO_0003824"),
        NodeType::Phenotype => (Namespace::Obo, "PATO_0000001"),
        NodeType::Organism => (Namespace::Schema, "Taxon"),
        NodeType::Publication => (Namespace::Schema, "ScholarlyArticle"),
        NodeType::Other => (Namespace::Schema, "Thing"),
    };
    Predicate::new(ns, local)
}

fn relation_predicate(relation: EdgeType) -> Predicate {
    let (ns, local) = match relation {
        EdgeType::IsA => (Namespace::Rdfs, "subClassOf"),
        EdgeType::PartOf => (Namespace::Obo, "BFO_0000050"),
        EdgeType::HasPart => (Namespace::Obo, "BFO_0000051"),
        EdgeType::Regulates => (Namespace::Obo, "RO_0002211"),
        EdgeType::PositivelyRegulates => (Namespace::Obo, "RO_0002213"),
        EdgeType::NegativelyRegulates => (Namespace::Obo, "RO_0002212"),
        EdgeType::ParticipatesIn => (Namespace::Obo, "RO_0000056"),
        EdgeType::HasParticipant => (Namespace::Obo, "RO_0000057"),
        EdgeType::AssociatedWith => (Namespace::Biokg, "associatedWith"),
        EdgeType::InteractsWith => (Namespace::Obo, "RO_0002434"),
        EdgeType::Xref => (Namespace::Obo, "hasDbXref"),
        EdgeType::SameAs => (Namespace::Obo, "IAO_0000039"),
        _ => (Namespace::Biokg, "relatedTo"),
    };
    Predicate::new(ns, local)
}

/// Triples grouped by subject in first-seen order, without duplicates
#[derive(Default)]
struct TripleSet {
    subjects: Vec<(String, Vec<(Predicate, Term)>)>,
    positions: HashMap<String, usize>,
    seen: HashSet<(String, Predicate, Term)>,
}

impl TripleSet {
    fn add(&mut self, subject: &str, predicate: Predicate, object: Term) {
        let key = (subject.to_string(), predicate.clone(), object.clone());
        if !self.seen.insert(key) {
            return;
        }
        let position = match self.positions.get(subject) {
            Some(&position) => position,
            None => {
                self.subjects.push((subject.to_string(), Vec::new()));
                self.positions
                    .insert(subject.to_string(), self.subjects.len() - 1);
                self.subjects.len() - 1
            }
        };
        self.subjects[position].1.push((predicate, object));
    }

    fn len(&self) -> usize {
        self.seen.len()
    }
}

fn node_uri(base_uri: &str, node_id: &str) -> String {
    escape_iri(&format!("{}{}", base_uri, node_id.replace(':', "_")))
}

fn collect_triples(graph: &KnowledgeGraph, prefixes: &Prefixes) -> TripleSet {
    let mut triples = TripleSet::default();

    for node in graph.nodes() {
        let subject = node_uri(&prefixes.base, node.id.as_str());
        triples.add(
            &subject,
            Predicate::new(Namespace::Rdf, "type"),
            Term::Iri(prefixes.expand(&node_type_class(node.node_type))),
        );
        triples.add(
            &subject,
            Predicate::new(Namespace::Rdfs, "label"),
            Term::Literal(node.label.clone()),
        );
        triples.add(
            &subject,
            Predicate::new(Namespace::Biokg, "source"),
            Term::Literal(node.source.to_string()),
        );

        for (key, value) in node.properties.to_map() {
            let predicate = if key == "definition" {
                Predicate::new(Namespace::Schema, "description")
            } else {
                Predicate::new(Namespace::Biokg, vocab_local(&key))
            };
            triples.add(&subject, predicate, Term::Literal(value));
        }

        for xref in &node.xrefs {
            triples.add(
                &subject,
                Predicate::new(Namespace::Obo, "hasDbXref"),
                Term::Literal(xref.clone()),
            );
        }
    }

    for edge in graph.edges() {
        triples.add(
            &node_uri(&prefixes.base, edge.source.as_str()),
            relation_predicate(edge.relation),
            Term::Iri(node_uri(&prefixes.base, edge.target.as_str())),
        );
    }

    triples
}

fn render_turtle(triples: &TripleSet, prefixes: &Prefixes) -> String {
    let mut out = String::new();
    for (prefix, ns) in prefixes.declarations() {
        let _ = writeln!(out, "@prefix {}: <{}> .", prefix, ns);
    }

    let term = |t: &Term| match t {
        Term::Iri(iri) => prefixes
            .compact(iri)
            .unwrap_or_else(|| format!("<{}>", iri)),
        Term::Literal(value) => format!("\"{}\"", escape_literal(value)),
    };

    for (subject, statements) in &triples.subjects {
        let _ = write!(out, "\n{}", term(&Term::Iri(subject.clone())));
        for (i, (predicate, object)) in statements.iter().enumerate() {
            let verb = if predicate.ns == Namespace::Rdf && predicate.local == "type" {
                "a".to_string()
            } else {
                format!("{}:{}", predicate.ns.prefix(), predicate.local)
            };
            let separator = if i + 1 == statements.len() { " ." } else { " ;" };
            if i == 0 {
                let _ = write!(out, " {} {}{}", verb, term(object), separator);
            } else {
                let _ = write!(out, "\n    {} {}{}", verb, term(object), separator);
            }
        }
        out.push('\n');
    }
    out
}

fn render_ntriples(triples: &TripleSet, prefixes: &Prefixes) -> String {
    let mut out = String::new();
    for (subject, statements) in &triples.subjects {
        for (predicate, object) in statements {
            let object = match object {
                Term::Iri(iri) => format!("<{}>", iri),
                Term::Literal(value) => format!("\"{}\"", escape_literal(value)),
            };
            let _ = writeln!(
                out,
                "<{}> <{}> {} .",
                subject,
                prefixes.expand(predicate),
                object
            );
        }
    }
    out
}

fn render_xml(triples: &TripleSet, prefixes: &Prefixes) -> String {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<rdf:RDF");
    for ns in [
        Namespace::Biokg,
        Namespace::Obo,
        Namespace::Rdf,
        Namespace::Rdfs,
        Namespace::Schema,
    ] {
        let _ = write!(
            out,
            "\n   xmlns:{}=\"{}\"",
            ns.prefix(),
            escape_xml(prefixes.namespace_iri(ns))
        );
    }
    out.push_str("\n>\n");

    for (subject, statements) in &triples.subjects {
        let _ = writeln!(out, "  <rdf:Description rdf:about=\"{}\">", escape_xml(subject));
        for (predicate, object) in statements {
            let element = format!("{}:{}", predicate.ns.prefix(), predicate.local);
            match object {
                Term::Iri(iri) => {
                    let _ = writeln!(
                        out,
                        "    <{} rdf:resource=\"{}\"/>",
                        element,
                        escape_xml(iri)
                    );
                }
                Term::Literal(value) => {
                    let _ = writeln!(out, "    <{0}>{1}</{0}>", element, escape_xml(value));
                }
            }
        }
        out.push_str("  </rdf:Description>\n");
    }
    out.push_str("</rdf:RDF>\n");
    out
}

/// Serialize the graph as RDF.
///
/// Each node yields a type assertion, label, source and one triple per
/// property and xref; each edge yields one triple whose predicate is chosen by
/// relation. Node IRIs are `base_uri` plus the id with `:` replaced by `_`.
pub fn to_rdf(graph: &KnowledgeGraph, options: &RdfOptions) -> String {
    let prefixes = Prefixes::new(&options.base_uri);
    let triples = collect_triples(graph, &prefixes);

    let rendered = match options.format {
        // Turtle is a subset of N3, so both share one writer
        RdfFormat::Turtle | RdfFormat::N3 => render_turtle(&triples, &prefixes),
        RdfFormat::NTriples => render_ntriples(&triples, &prefixes),
        RdfFormat::Xml => render_xml(&triples, &prefixes),
    };

    info!(
        graph = %graph.name,
        format = options.format.as_str(),
        triples = triples.len(),
        "Exported RDF"
    );
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{DataSource, Edge, Node};

    fn create_test_kg() -> KnowledgeGraph {
        let mut kg = KnowledgeGraph::new("RDF");
        kg.add_node(
            Node::new("DOID:1612", "breast \"cancer\"", NodeType::Disease)
                .with_source(DataSource::DiseaseOntology)
                .with_property("definition", "A thoracic cancer")
                .with_property("is root", "true")
                .with_xrefs(["MESH:D001943"]),
        )
        .unwrap();
        kg.add_node(
            Node::new("DOID:162", "cancer", NodeType::Disease)
                .with_source(DataSource::DiseaseOntology),
        )
        .unwrap();
        kg.add_node(Node::new("TP53", "TP53", NodeType::Gene)).unwrap();
        kg.add_edge(Edge::new("DOID:1612", "DOID:162", EdgeType::IsA))
            .unwrap();
        kg.add_edge(Edge::new("TP53", "DOID:1612", EdgeType::AssociatedWith))
            .unwrap();
        kg.add_edge(Edge::new("TP53", "DOID:162", EdgeType::Encodes))
            .unwrap();
        kg
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("turtle".parse::<RdfFormat>().unwrap(), RdfFormat::Turtle);
        assert_eq!("TTL".parse::<RdfFormat>().unwrap(), RdfFormat::Turtle);
        assert_eq!("nt".parse::<RdfFormat>().unwrap(), RdfFormat::NTriples);
        assert_eq!("xml".parse::<RdfFormat>().unwrap(), RdfFormat::Xml);
        assert!(matches!(
            "json-ld".parse::<RdfFormat>(),
            Err(GraphError::UnsupportedFormat(f)) if f == "json-ld"
        ));
    }

    #[test]
    fn test_turtle() {
        let ttl = to_rdf(&create_test_kg(), &RdfOptions::default());
        assert!(ttl.starts_with("@prefix base: <http://example.org/biokg/> ."));
        assert!(ttl.contains("@prefix biokg: <http://example.org/biokg/vocab/> ."));
        assert!(ttl.contains("\nbase:DOID_1612 a obo:DOID_4 ;\n"));
        assert!(ttl.contains("    rdfs:label \"breast \\\"cancer\\\"\" ;\n"));
        assert!(ttl.contains("    biokg:source \"disease_ontology\" ;\n"));
        assert!(ttl.contains("    schema:description \"A thoracic cancer\" ;\n"));
        assert!(ttl.contains("    biokg:is_root \"true\" ;\n"));
        assert!(ttl.contains("    obo:hasDbXref \"MESH:D001943\" ;\n"));
        assert!(ttl.contains("    rdfs:subClassOf base:DOID_162 .\n"));
        assert!(ttl.contains("\nbase:TP53 a schema:Gene ;\n"));
        assert!(ttl.contains("    biokg:associatedWith base:DOID_1612 ;\n"));
        assert!(ttl.contains("    biokg:relatedTo base:DOID_162 .\n"));
    }

    #[test]
    fn test_ntriples() {
        let options = RdfOptions {
            format: RdfFormat::NTriples,
            base_uri: "http://kg.test/".to_string(),
        };
        let nt = to_rdf(&create_test_kg(), &options);
        assert!(nt.contains(
            "<http://kg.test/DOID_1612> <http://www.w3.org/2000/01/rdf-schema#subClassOf> <http://kg.test/DOID_162> .\n"
        ));
        assert!(nt.contains(
            "<http://kg.test/TP53> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://schema.org/Gene> .\n"
        ));
        assert!(nt.contains("<http://kg.test/vocab/source> \"custom\" .\n"));
        // 3 nodes: type, label, source each, plus 3 properties/xrefs and 3 edges
        assert_eq!(nt.lines().count(), 15);
    }

    #[test]
    fn test_xml() {
        let options = RdfOptions {
            format: RdfFormat::Xml,
            ..RdfOptions::default()
        };
        let xml = to_rdf(&create_test_kg(), &options);
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<rdf:RDF"));
        assert!(xml.contains("xmlns:biokg=\"http://example.org/biokg/vocab/\""));
        assert!(xml.contains("<rdf:Description rdf:about=\"http://example.org/biokg/DOID_1612\">"));
        assert!(xml.contains("<rdfs:label>breast &quot;cancer&quot;</rdfs:label>"));
        assert!(xml.contains(
            "<rdfs:subClassOf rdf:resource=\"http://example.org/biokg/DOID_162\"/>"
        ));
        assert!(xml.trim_end().ends_with("</rdf:RDF>"));
    }

    #[test]
    fn test_duplicate_triples_collapse() {
        let mut kg = create_test_kg();
        kg.add_edge(Edge::new("DOID:1612", "DOID:162", EdgeType::IsA).with_weight(0.5))
            .unwrap();
        let options = RdfOptions {
            format: RdfFormat::NTriples,
            ..RdfOptions::default()
        };
        assert_eq!(to_rdf(&kg, &options).lines().count(), 15);
    }

    #[test]
    fn test_iri_escaping() {
        assert_eq!(node_uri("http://x/", "a b:c"), "http://x/a%20b_c");
        assert_eq!(vocab_local("1st key"), "_1st_key");
    }

    #[test]
    fn test_xml_drops_unrepresentable_characters() {
        assert_eq!(escape_xml("a\u{1}b\u{8}c\u{1B}d"), "abcd");
        assert_eq!(escape_xml("tab\there\nline\r"), "tab\there\nline\r");
        assert_eq!(escape_xml("x\u{FFFF}y"), "xy");
        assert_eq!(escape_xml("<a & 'b'>"), "&lt;a &amp; &apos;b&apos;&gt;");

        let mut kg = KnowledgeGraph::new("Controls");
        kg.add_node(Node::new("BEL", "bell\u{7}label", NodeType::Other))
            .unwrap();
        let options = RdfOptions {
            format: RdfFormat::Xml,
            ..RdfOptions::default()
        };
        let xml = to_rdf(&kg, &options);
        assert!(xml.contains("<rdfs:label>belllabel</rdfs:label>"));
        assert!(!xml.contains('\u{7}'));
    }
}
