mod standard;

use std::collections::{BTreeMap, HashMap, HashSet};
use std::io::Read;

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use tracing::warn;

use super::domain::{case_slot_id, CaseId, SlotTemplate, VisaType};

/// Load-time validation failures for a slot catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate slot template id '{0}'")]
    DuplicateTemplate(String),
    #[error("slot template '{template_id}' has max count {max} below min count {min}")]
    InvalidCapacity {
        template_id: String,
        min: u32,
        max: u32,
    },
    #[error("slot template '{0}' depends on itself")]
    SelfDependency(String),
    #[error("dependency cycle detected at slot template '{0}'")]
    DependencyCycle(String),
    #[error("invalid catalog definition: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unable to read catalog: {0}")]
    Io(#[from] std::io::Error),
}

/// Immutable, validated set of slot templates for one visa type.
#[derive(Debug, Clone)]
pub struct SlotCatalog {
    visa_type: VisaType,
    templates: Vec<SlotTemplate>,
    resolution_order: Vec<usize>,
}

impl SlotCatalog {
    /// Validate templates and compute the dependency-first resolution order.
    pub fn new(visa_type: VisaType, templates: Vec<SlotTemplate>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for template in &templates {
            if !seen.insert(template.id.as_str()) {
                return Err(CatalogError::DuplicateTemplate(template.id.clone()));
            }

            if let Some(max) = template.max_count {
                if max == 0 || max < template.min_count {
                    return Err(CatalogError::InvalidCapacity {
                        template_id: template.id.clone(),
                        min: template.min_count,
                        max,
                    });
                }
            }
        }

        let resolution_order = dependency_order(&templates)?;

        Ok(Self {
            visa_type,
            templates,
            resolution_order,
        })
    }

    /// Parse a JSON array of templates and validate it.
    pub fn from_json<R: Read>(visa_type: VisaType, reader: R) -> Result<Self, CatalogError> {
        let templates: Vec<SlotTemplate> = serde_json::from_reader(reader)?;
        Self::new(visa_type, templates)
    }

    pub fn standard(visa_type: VisaType) -> Result<Self, CatalogError> {
        Self::new(visa_type, standard::templates(visa_type))
    }

    pub fn visa_type(&self) -> VisaType {
        self.visa_type
    }

    /// Templates in catalog order.
    pub fn templates(&self) -> &[SlotTemplate] {
        &self.templates
    }

    pub fn template(&self, template_id: &str) -> Option<&SlotTemplate> {
        self.templates
            .iter()
            .find(|template| template.id == template_id)
    }

    /// Templates ordered so that every dependency precedes its dependents.
    pub fn in_resolution_order(&self) -> impl Iterator<Item = &SlotTemplate> + '_ {
        self.resolution_order
            .iter()
            .map(move |index| &self.templates[*index])
    }

    /// Templates with case-scoped ids (`{case_id}-{template_id}`), dependency targets included.
    pub fn templates_for(&self, case_id: &CaseId) -> Vec<SlotTemplate> {
        self.templates
            .iter()
            .map(|template| scope_template(template, case_id))
            .collect()
    }
}

pub(crate) fn scope_template(template: &SlotTemplate, case_id: &CaseId) -> SlotTemplate {
    let mut scoped = template.clone();
    scoped.id = case_slot_id(case_id, &template.id);
    if let Some(dependency) = scoped.depends_on.as_mut() {
        dependency.slot_id = case_slot_id(case_id, &dependency.slot_id);
    }
    scoped
}

fn dependency_order(templates: &[SlotTemplate]) -> Result<Vec<usize>, CatalogError> {
    let positions: HashMap<&str, usize> = templates
        .iter()
        .enumerate()
        .map(|(index, template)| (template.id.as_str(), index))
        .collect();

    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();
    for template in templates {
        graph.add_node(template.id.as_str());
    }

    for template in templates {
        let Some(dependency) = &template.depends_on else {
            continue;
        };

        if dependency.slot_id == template.id {
            return Err(CatalogError::SelfDependency(template.id.clone()));
        }

        if positions.contains_key(dependency.slot_id.as_str()) {
            graph.add_edge(dependency.slot_id.as_str(), template.id.as_str(), ());
        } else {
            warn!(
                template_id = %template.id,
                missing = %dependency.slot_id,
                "slot dependency references unknown template; slot will stay hidden"
            );
        }
    }

    let order = toposort(&graph, None)
        .map_err(|cycle| CatalogError::DependencyCycle(cycle.node_id().to_string()))?;

    Ok(order.into_iter().map(|id| positions[id]).collect())
}

/// Catalogs keyed by visa type, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct CatalogRegistry {
    catalogs: BTreeMap<VisaType, SlotCatalog>,
}

impl CatalogRegistry {
    pub fn standard() -> Result<Self, CatalogError> {
        let mut catalogs = BTreeMap::new();
        for visa_type in VisaType::ordered() {
            catalogs.insert(visa_type, SlotCatalog::standard(visa_type)?);
        }
        Ok(Self { catalogs })
    }

    /// Replace the catalog registered for the catalog's visa type.
    pub fn with_catalog(mut self, catalog: SlotCatalog) -> Self {
        self.catalogs.insert(catalog.visa_type(), catalog);
        self
    }

    pub fn catalog(&self, visa_type: VisaType) -> Option<&SlotCatalog> {
        self.catalogs.get(&visa_type)
    }

    /// Case-scoped templates for a visa type; empty when no catalog is registered.
    pub fn templates_for(&self, visa_type: VisaType, case_id: &CaseId) -> Vec<SlotTemplate> {
        self.catalog(visa_type)
            .map(|catalog| catalog.templates_for(case_id))
            .unwrap_or_default()
    }
}
