use indexmap::IndexMap;

pub const CLUSTERS_SECTION: &str = "Clusters";
pub const HOSTS_SECTION: &str = "Hosts";
pub const DATABASES_SECTION: &str = "Databases";
pub const WEB_SERVICES_SECTION: &str = "WebServices";

/// Prefix of the synthetic ids a `/name/` ground reference expands into.
pub const GROUND_PREFIX: &str = "xg";
/// Prefix of the synthetic pass-through nodes of a named connection group.
pub const GROUP_PREFIX: &str = "xv";

/// Width of the tag taken from a section name (`Clus`, `Host`).
const SECTION_TAG_LEN: usize = 4;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Node {
    pub id: String,
    pub label: String,
    pub attributes: Vec<String>,
    pub children: Vec<String>,
    pub parent: Option<String>,
}

impl Node {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            label: id.to_string(),
            ..Self::default()
        }
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// True when the label would print differently from the raw id.
    pub fn needs_label(&self) -> bool {
        self.label != self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetStyle {
    Solid,
    Dashed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Net {
    pub left: String,
    pub right: String,
    pub style: NetStyle,
    pub name: Option<String>,
}

/// Ground-reference names in first-seen order, each with the next unused
/// instance number.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GroundRefs {
    counters: IndexMap<String, usize>,
}

impl GroundRefs {
    /// Hands out `xg_<name>_<n>` and advances the counter for `name`. The
    /// first call for a name fixes its position in `names`.
    pub fn allocate(&mut self, name: &str) -> String {
        let counter = self.counters.entry(name.to_string()).or_insert(1);
        let id = ground_id(name, *counter);
        *counter += 1;
        id
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.counters.keys().map(String::as_str)
    }

    pub fn next_counter(&self, name: &str) -> usize {
        self.counters.get(name).copied().unwrap_or(1)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.counters.get_index_of(name)
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct InfraGraph {
    pub nodes: IndexMap<String, Node>,
    pub nets: Vec<Net>,
    pub database_nodes: Vec<String>,
    pub web_nodes: Vec<String>,
    pub ground_refs: GroundRefs,
}

impl InfraGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn node_mut(&mut self, id: &str) -> &mut Node {
        self.nodes
            .entry(id.to_string())
            .or_insert_with(|| Node::new(id))
    }

    /// Sets `child.parent` and appends to `parent.children` together so the
    /// two sides never disagree.
    pub fn link(&mut self, parent: &str, child: &str) {
        self.node_mut(child).parent = Some(parent.to_string());
        self.node_mut(parent).children.push(child.to_string());
    }

    pub fn children_of<'a>(&'a self, node: &'a Node) -> impl Iterator<Item = &'a Node> {
        node.children.iter().filter_map(|id| self.nodes.get(id))
    }

    /// Nodes whose parent is `parent`, in declaration order.
    pub fn nodes_under<'a>(&'a self, parent: &'a str) -> impl Iterator<Item = &'a Node> {
        self.nodes
            .values()
            .filter(move |n| n.parent.as_deref() == Some(parent))
    }

    pub fn record_database(&mut self, id: &str) {
        if !self.database_nodes.iter().any(|d| d == id) {
            self.database_nodes.push(id.to_string());
        }
    }

    pub fn record_web(&mut self, id: &str) {
        if !self.web_nodes.iter().any(|w| w == id) {
            self.web_nodes.push(id.to_string());
        }
    }
}

pub fn ground_id(name: &str, instance: usize) -> String {
    format!("{GROUND_PREFIX}_{name}_{instance}")
}

pub fn group_id(name: &str, instance: usize) -> String {
    format!("{GROUP_PREFIX}_{name}_{instance}")
}

/// Recovers the base name from a synthetic ground id: `xg_core_2` -> `core`.
pub fn ground_base(id: &str) -> Option<&str> {
    let rest = id.strip_prefix(GROUND_PREFIX)?.strip_prefix('_')?;
    let (base, instance) = rest.rsplit_once('_')?;
    if base.is_empty() || instance.is_empty() || !instance.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(base)
}

/// Whether direct children of `section` get their ids tagged.
pub fn is_tagged_section(section: &str) -> bool {
    section == CLUSTERS_SECTION || section == HOSTS_SECTION
}

/// `Hosts` + `web1` -> `Host_web1`.
pub fn tagged_id(section: &str, id: &str) -> String {
    let tag: String = section.chars().take(SECTION_TAG_LEN).collect();
    format!("{tag}_{id}")
}

/// Drops the `Clus_`/`Host_` tag again; ids without one come back unchanged.
pub fn strip_section_tag(id: &str) -> &str {
    [CLUSTERS_SECTION, HOSTS_SECTION]
        .iter()
        .find_map(|section| {
            let tag = &section[..SECTION_TAG_LEN];
            id.strip_prefix(tag)?.strip_prefix('_')
        })
        .unwrap_or(id)
}
