//! Element-Index der Referenz-Engine.
//!
//! Liest aus dem STEP-Text einer IFC-Datei nur die Entity-Nummern und Typen
//! der Bauteile (`#42=IFCWALL(...)`). Attribute und Geometrie werden nicht
//! ausgewertet.

use super::{ElementId, EngineError};
use regex::Regex;
use std::sync::OnceLock;

/// STEP-Header, den jede IFC-Datei trägt.
const STEP_MAGIC: &str = "ISO-10303-21";

/// IFC-Typen, die als sichtbare Bauteile indiziert werden (IFC2x3 und IFC4).
const ELEMENT_TYPES: &[&str] = &[
    // Bauteile
    "IFCBEAM",
    "IFCBEAMSTANDARDCASE",
    "IFCBUILDINGELEMENTPROXY",
    "IFCCHIMNEY",
    "IFCCOLUMN",
    "IFCCOLUMNSTANDARDCASE",
    "IFCCOVERING",
    "IFCCURTAINWALL",
    "IFCDOOR",
    "IFCDOORSTANDARDCASE",
    "IFCFOOTING",
    "IFCMEMBER",
    "IFCMEMBERSTANDARDCASE",
    "IFCPILE",
    "IFCPLATE",
    "IFCPLATESTANDARDCASE",
    "IFCRAILING",
    "IFCRAMP",
    "IFCRAMPFLIGHT",
    "IFCROOF",
    "IFCSHADINGDEVICE",
    "IFCSLAB",
    "IFCSLABELEMENTEDCASE",
    "IFCSLABSTANDARDCASE",
    "IFCSTAIR",
    "IFCSTAIRFLIGHT",
    "IFCWALL",
    "IFCWALLELEMENTEDCASE",
    "IFCWALLSTANDARDCASE",
    "IFCWINDOW",
    "IFCWINDOWSTANDARDCASE",
    // Komponenten
    "IFCBUILDINGELEMENTPART",
    "IFCDISCRETEACCESSORY",
    "IFCFASTENER",
    "IFCMECHANICALFASTENER",
    "IFCREINFORCINGBAR",
    "IFCREINFORCINGMESH",
    "IFCTENDON",
    "IFCTENDONANCHOR",
    "IFCVIBRATIONISOLATOR",
    // Ausstattung
    "IFCFURNISHINGELEMENT",
    "IFCFURNITURE",
    "IFCSYSTEMFURNITUREELEMENT",
    "IFCTRANSPORTELEMENT",
    "IFCELEMENTASSEMBLY",
    "IFCGEOGRAPHICELEMENT",
    "IFCCIVILELEMENT",
    // Haustechnik, abstrakte Ebene (IFC2x3)
    "IFCDISTRIBUTIONELEMENT",
    "IFCDISTRIBUTIONFLOWELEMENT",
    "IFCDISTRIBUTIONCONTROLELEMENT",
    "IFCDISTRIBUTIONCHAMBERELEMENT",
    "IFCENERGYCONVERSIONDEVICE",
    "IFCFLOWCONTROLLER",
    "IFCFLOWFITTING",
    "IFCFLOWMOVINGDEVICE",
    "IFCFLOWSEGMENT",
    "IFCFLOWSTORAGEDEVICE",
    "IFCFLOWTERMINAL",
    "IFCFLOWTREATMENTDEVICE",
    // Haustechnik, konkrete Typen (IFC4)
    "IFCCABLECARRIERSEGMENT",
    "IFCCABLESEGMENT",
    "IFCDUCTSEGMENT",
    "IFCPIPESEGMENT",
    "IFCCABLECARRIERFITTING",
    "IFCCABLEFITTING",
    "IFCDUCTFITTING",
    "IFCJUNCTIONBOX",
    "IFCPIPEFITTING",
    "IFCAIRTERMINAL",
    "IFCAUDIOVISUALAPPLIANCE",
    "IFCCOMMUNICATIONSAPPLIANCE",
    "IFCELECTRICAPPLIANCE",
    "IFCFIRESUPPRESSIONTERMINAL",
    "IFCLAMP",
    "IFCLIGHTFIXTURE",
    "IFCMEDICALDEVICE",
    "IFCOUTLET",
    "IFCSANITARYTERMINAL",
    "IFCSPACEHEATER",
    "IFCSTACKTERMINAL",
    "IFCWASTETERMINAL",
    "IFCAIRTERMINALBOX",
    "IFCDAMPER",
    "IFCELECTRICDISTRIBUTIONBOARD",
    "IFCELECTRICTIMECONTROL",
    "IFCFLOWMETER",
    "IFCPROTECTIVEDEVICE",
    "IFCSWITCHINGDEVICE",
    "IFCVALVE",
    "IFCCOMPRESSOR",
    "IFCFAN",
    "IFCPUMP",
    "IFCELECTRICFLOWSTORAGEDEVICE",
    "IFCTANK",
    "IFCDUCTSILENCER",
    "IFCFILTER",
    "IFCINTERCEPTOR",
    "IFCAIRTOAIRHEATRECOVERY",
    "IFCBOILER",
    "IFCBURNER",
    "IFCCHILLER",
    "IFCCOIL",
    "IFCCONDENSER",
    "IFCCOOLEDBEAM",
    "IFCCOOLINGTOWER",
    "IFCELECTRICGENERATOR",
    "IFCELECTRICMOTOR",
    "IFCENGINE",
    "IFCEVAPORATIVECOOLER",
    "IFCEVAPORATOR",
    "IFCHEATEXCHANGER",
    "IFCHUMIDIFIER",
    "IFCMOTORCONNECTION",
    "IFCSOLARDEVICE",
    "IFCTRANSFORMER",
    "IFCTUBEBUNDLE",
    "IFCUNITARYEQUIPMENT",
    "IFCACTUATOR",
    "IFCALARM",
    "IFCCONTROLLER",
    "IFCFLOWINSTRUMENT",
    "IFCPROTECTIVEDEVICETRIPPINGUNIT",
    "IFCSENSOR",
    "IFCUNITARYCONTROLELEMENT",
];

/// Ein indiziertes Bauteil.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedElement {
    /// Entity-Nummer
    pub id: ElementId,
    /// IFC-Typ in Großbuchstaben, z.B. `IFCWALL`
    pub ifc_type: String,
}

fn entity_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^\s*#(\d+)\s*=\s*(IFC[A-Z0-9_]+)\s*\(").ok())
        .as_ref()
}

/// Indiziert alle Bauteile in Dateireihenfolge.
///
/// `source` dient nur der Fehlermeldung.
pub fn index_elements(content: &str, source: &str) -> Result<Vec<IndexedElement>, EngineError> {
    let body = content.trim_start_matches('\u{feff}').trim_start();
    let Some(re) = entity_regex().filter(|_| body.starts_with(STEP_MAGIC)) else {
        return Err(EngineError::UnsupportedFormat(source.to_string()));
    };

    let elements: Vec<IndexedElement> = re
        .captures_iter(content)
        .filter_map(|caps| {
            let ifc_type = caps.get(2)?.as_str();
            if !ELEMENT_TYPES.contains(&ifc_type) {
                return None;
            }
            let id = caps.get(1)?.as_str().parse::<u32>().ok()?;
            Some(IndexedElement {
                id: ElementId(id),
                ifc_type: ifc_type.to_string(),
            })
        })
        .collect();

    if elements.is_empty() {
        return Err(EngineError::NoElements(source.to_string()));
    }

    log::debug!("{} Bauteile in {} indiziert", elements.len(), source);
    Ok(elements)
}
