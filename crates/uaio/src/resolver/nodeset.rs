// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! OPC UA NodeSet2 XML loader.
//!
//! Reads the `UADataType` nodes of a NodeSet2 document into a
//! [`TypeRegistry`]:
//!
//! ```xml
//! <UANodeSet>
//!   <Aliases>
//!     <Alias Alias="Int32">i=6</Alias>
//!     <Alias Alias="HasSubtype">i=45</Alias>
//!   </Aliases>
//!   <UADataType NodeId="ns=1;i=3001" BrowseName="1:Point">
//!     <References>
//!       <Reference ReferenceType="HasSubtype" IsForward="false">i=22</Reference>
//!     </References>
//!     <Definition Name="1:Point">
//!       <Field Name="x" DataType="Int32" />
//!       <Field Name="samples" DataType="i=11" ValueRank="1" />
//!     </Definition>
//!   </UADataType>
//! </UANodeSet>
//! ```
//!
//! Node ids are taken literally; namespace indexes are not remapped
//! through `NamespaceUris`. Enumeration definitions (fields with `Value`
//! but no `DataType`) only contribute their parent link.

use super::{parse_node_id, SchemaLoadError, TypeRegistry};
use crate::ua::{StructureDefinition, StructureField, UaNodeId};
use roxmltree::{Document, Node};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Numeric id of the `HasSubtype` reference type.
const HAS_SUBTYPE: u32 = 45;

pub struct NodeSetLoader;

impl NodeSetLoader {
    /// Load data types from a NodeSet2 XML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<TypeRegistry, SchemaLoadError> {
        let xml_content = fs::read_to_string(path)?;
        Self::parse_xml(&xml_content)
    }

    /// Parse NodeSet2 XML content.
    pub fn parse_xml(xml_content: &str) -> Result<TypeRegistry, SchemaLoadError> {
        let doc = Document::parse(xml_content)?;
        let root = doc.root_element();

        let aliases = Self::parse_aliases(&root)?;
        let mut registry = TypeRegistry::new();
        let mut structures = 0usize;
        let mut subtypes = 0usize;

        for node in root
            .children()
            .filter(|n| n.is_element() && n.tag_name().name() == "UADataType")
        {
            let node_id = node
                .attribute("NodeId")
                .ok_or(SchemaLoadError::MissingAttribute {
                    element: "UADataType",
                    attribute: "NodeId",
                })?;
            let type_id = parse_node_id(node_id, &aliases)?;

            if let Some(parent) = Self::parent_of(&node, &aliases)? {
                registry.register_subtype(type_id.clone(), parent);
                subtypes += 1;
            }

            let name = node
                .attribute("BrowseName")
                .map(strip_namespace_prefix)
                .unwrap_or_default();
            if let Some(definition) = node
                .children()
                .find(|n| n.is_element() && n.tag_name().name() == "Definition")
            {
                if let Some(structure) =
                    Self::parse_definition(&definition, type_id, name, &aliases)?
                {
                    registry.register(structure);
                    structures += 1;
                }
            }
        }

        log::debug!(
            "[nodeset] loaded {} structure definition(s), {} subtype link(s), {} alias(es)",
            structures,
            subtypes,
            aliases.len()
        );
        Ok(registry)
    }

    fn parse_aliases(root: &Node) -> Result<HashMap<String, UaNodeId>, SchemaLoadError> {
        let mut aliases = HashMap::new();
        let Some(section) = root
            .children()
            .find(|n| n.is_element() && n.tag_name().name() == "Aliases")
        else {
            return Ok(aliases);
        };
        for alias in section
            .children()
            .filter(|n| n.is_element() && n.tag_name().name() == "Alias")
        {
            let name = alias.attribute("Alias").ok_or(SchemaLoadError::MissingAttribute {
                element: "Alias",
                attribute: "Alias",
            })?;
            let target = alias.text().unwrap_or_default();
            let id = target.trim().parse().map_err(|source| SchemaLoadError::NodeId {
                value: target.to_string(),
                source,
            })?;
            aliases.insert(name.to_string(), id);
        }
        Ok(aliases)
    }

    /// Target of the inverse `HasSubtype` reference, if any.
    fn parent_of(
        node: &Node,
        aliases: &HashMap<String, UaNodeId>,
    ) -> Result<Option<UaNodeId>, SchemaLoadError> {
        let Some(references) = node
            .children()
            .find(|n| n.is_element() && n.tag_name().name() == "References")
        else {
            return Ok(None);
        };
        for reference in references
            .children()
            .filter(|n| n.is_element() && n.tag_name().name() == "Reference")
        {
            let inverse = reference
                .attribute("IsForward")
                .is_some_and(|v| v.trim().eq_ignore_ascii_case("false"));
            if !inverse {
                continue;
            }
            let Some(kind) = reference.attribute("ReferenceType") else {
                continue;
            };
            let is_subtype = kind == "HasSubtype"
                || parse_node_id(kind, aliases)
                    .map(|id| id == UaNodeId::numeric(0, HAS_SUBTYPE))
                    .unwrap_or(false);
            if is_subtype {
                let target = reference.text().unwrap_or_default();
                return parse_node_id(target.trim(), aliases).map(Some);
            }
        }
        Ok(None)
    }

    fn parse_definition(
        definition: &Node,
        type_id: UaNodeId,
        name: String,
        aliases: &HashMap<String, UaNodeId>,
    ) -> Result<Option<StructureDefinition>, SchemaLoadError> {
        let field_nodes: Vec<Node> = definition
            .children()
            .filter(|n| n.is_element() && n.tag_name().name() == "Field")
            .collect();

        let is_enumeration = !field_nodes.is_empty()
            && field_nodes
                .iter()
                .all(|f| f.attribute("DataType").is_none() && f.attribute("Value").is_some());
        if is_enumeration {
            return Ok(None);
        }

        let mut structure = StructureDefinition::new(type_id, name);
        structure.is_union = parse_bool(definition, "IsUnion")?;

        for field in field_nodes {
            let field_name = field.attribute("Name").ok_or(SchemaLoadError::MissingAttribute {
                element: "Field",
                attribute: "Name",
            })?;
            // DataType defaults to BaseDataType (i=24)
            let data_type = match field.attribute("DataType") {
                Some(value) => parse_node_id(value, aliases)?,
                None => UaNodeId::numeric(0, crate::ua::data_type_ids::BASE_DATA_TYPE),
            };
            let mut entry = StructureField::new(field_name, data_type);
            match field.attribute("ValueRank").map(str::trim) {
                None | Some("-1") => {}
                Some("1") => entry = entry.array(),
                Some(other) => {
                    return Err(SchemaLoadError::InvalidValue {
                        attribute: "ValueRank",
                        value: other.to_string(),
                    })
                }
            }
            if parse_bool(&field, "IsOptional")? {
                entry = entry.optional();
            }
            structure.fields.push(entry);
        }
        Ok(Some(structure))
    }
}

fn parse_bool(node: &Node, attribute: &'static str) -> Result<bool, SchemaLoadError> {
    match node.attribute(attribute).map(str::trim) {
        None => Ok(false),
        Some("true") | Some("1") => Ok(true),
        Some("false") | Some("0") => Ok(false),
        Some(other) => Err(SchemaLoadError::InvalidValue {
            attribute,
            value: other.to_string(),
        }),
    }
}

/// `"1:Point"` -> `"Point"`
fn strip_namespace_prefix(browse_name: &str) -> String {
    match browse_name.split_once(':') {
        Some((ns, name)) if ns.chars().all(|c| c.is_ascii_digit()) => name.to_string(),
        _ => browse_name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::TypeResolver;

    const NODESET: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<UANodeSet xmlns="http://opcfoundation.org/UA/2011/03/UANodeSet.xsd">
  <Aliases>
    <Alias Alias="Int32">i=6</Alias>
    <Alias Alias="Double">i=11</Alias>
    <Alias Alias="HasSubtype">i=45</Alias>
  </Aliases>
  <UADataType NodeId="ns=1;i=3001" BrowseName="1:Point">
    <References>
      <Reference ReferenceType="HasSubtype" IsForward="false">i=22</Reference>
    </References>
    <Definition Name="1:Point">
      <Field Name="x" DataType="Int32" />
      <Field Name="y" DataType="Double" />
    </Definition>
  </UADataType>
  <UADataType NodeId="ns=1;i=3002" BrowseName="1:Point3D">
    <References>
      <Reference ReferenceType="i=45" IsForward="false">ns=1;i=3001</Reference>
    </References>
    <Definition Name="1:Point3D">
      <Field Name="z" DataType="Double" IsOptional="true" />
      <Field Name="history" DataType="Double" ValueRank="1" />
    </Definition>
  </UADataType>
  <UADataType NodeId="ns=1;i=3003" BrowseName="1:Mode">
    <References>
      <Reference ReferenceType="HasSubtype" IsForward="false">i=29</Reference>
    </References>
    <Definition Name="1:Mode">
      <Field Name="Off" Value="0" />
      <Field Name="On" Value="1" />
    </Definition>
  </UADataType>
</UANodeSet>"#;

    #[test]
    fn test_parse_nodeset() {
        let registry = NodeSetLoader::parse_xml(NODESET).unwrap();
        assert_eq!(registry.len(), 2);

        let point = registry.resolve_structure(&UaNodeId::numeric(1, 3001)).unwrap();
        assert_eq!(point.name, "Point");
        assert_eq!(point.fields[0].data_type_id, UaNodeId::numeric(0, 6));

        let point3d = registry.resolve_structure(&UaNodeId::numeric(1, 3002)).unwrap();
        assert!(point3d.field("z").unwrap().optional);
        assert!(point3d.field("history").unwrap().is_array);

        assert_eq!(
            registry.resolve_supertypes(&UaNodeId::numeric(1, 3002)).unwrap(),
            vec![UaNodeId::numeric(1, 3001), UaNodeId::numeric(0, 22)]
        );
        assert_eq!(
            registry.resolve_supertypes(&UaNodeId::numeric(1, 3003)).unwrap(),
            vec![UaNodeId::numeric(0, 29)]
        );
        assert!(registry.resolve_structure(&UaNodeId::numeric(1, 3003)).is_err());
    }

    #[test]
    fn test_invalid_documents() {
        assert!(matches!(
            NodeSetLoader::parse_xml("<UANodeSet>"),
            Err(SchemaLoadError::Xml(_))
        ));
        assert!(matches!(
            NodeSetLoader::parse_xml("<UANodeSet><UADataType/></UANodeSet>"),
            Err(SchemaLoadError::MissingAttribute { attribute: "NodeId", .. })
        ));
        assert!(matches!(
            NodeSetLoader::parse_xml(
                r#"<UANodeSet><UADataType NodeId="ns=1;i=1"><Definition>
                   <Field Name="m" DataType="i=6" ValueRank="2"/></Definition></UADataType></UANodeSet>"#
            ),
            Err(SchemaLoadError::InvalidValue { attribute: "ValueRank", .. })
        ));
    }

    #[test]
    fn test_strip_namespace_prefix() {
        assert_eq!(strip_namespace_prefix("1:Point"), "Point");
        assert_eq!(strip_namespace_prefix("Point"), "Point");
        assert_eq!(strip_namespace_prefix("a:b"), "a:b");
    }
}
