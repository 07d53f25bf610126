//! Serde support for parsed script trees.
//!
//! Blocks whose first member is an assignment deserialize as maps or
//! structs, other blocks as sequences. `yes`/`no` are booleans and unit
//! enum variants are read from bare words.

use serde::de::{self, DeserializeSeed, IntoDeserializer, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, forward_to_deserialize_any};

use crate::{PdxAstItem, PdxNode};
use std::fmt;

pub struct Deserializer<'de> {
    input: &'de PdxNode,
}

impl<'de> Deserializer<'de> {
    pub fn from_node(input: &'de PdxNode) -> Self {
        Deserializer { input }
    }
}

pub fn from_node<'a, T>(node: &'a PdxNode) -> Result<T, Error>
where
    T: Deserialize<'a>,
{
    let mut deserializer = Deserializer::from_node(node);
    T::deserialize(&mut deserializer)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Error(String);

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for Error {}

impl de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error(msg.to_string())
    }
}

impl<'de> Deserializer<'de> {
    fn node(&self) -> &'de PdxNode {
        self.input
    }

    fn word(&self) -> Option<&'de str> {
        match &self.node().entry {
            PdxAstItem::Identifier(s) | PdxAstItem::StringValue(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl<'de> de::Deserializer<'de> for &mut Deserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        let input = self.node();
        match &input.entry {
            PdxAstItem::Identifier(s) | PdxAstItem::StringValue(s) => visitor.visit_borrowed_str(s),
            PdxAstItem::IntValue(i) => visitor.visit_i64(*i),
            PdxAstItem::FloatValue(f) => visitor.visit_f64(*f),
            PdxAstItem::AssignmentList => {
                if input
                    .children
                    .first()
                    .is_some_and(|first| matches!(first.entry, PdxAstItem::Assignment))
                {
                    return self.deserialize_map(visitor);
                }
                self.deserialize_seq(visitor)
            }
            PdxAstItem::Assignment => Err(Error(
                "Unexpected assignment where a value was expected".to_string(),
            )),
        }
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        match self.word() {
            Some("yes") => visitor.visit_bool(true),
            Some("no") => visitor.visit_bool(false),
            Some(other) => Err(Error(format!("Invalid bool: {}", other))),
            None => Err(Error("Not a bool".to_string())),
        }
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        match &self.node().entry {
            PdxAstItem::Identifier(s) | PdxAstItem::StringValue(s) => visitor.visit_borrowed_str(s),
            // Numeric keys (province ids, years) are still valid map keys.
            PdxAstItem::IntValue(i) => visitor.visit_string(i.to_string()),
            PdxAstItem::FloatValue(f) => visitor.visit_string(f.to_string()),
            _ => Err(Error("Not a string".to_string())),
        }
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        let input = self.node();
        match input.entry {
            PdxAstItem::AssignmentList => visitor.visit_seq(Children::new(&input.children)),
            // `usable_by = GER` is shorthand for a one-element list.
            _ => visitor.visit_seq(Children::new(std::slice::from_ref(input))),
        }
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        self.deserialize_map(visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        let input = self.node();
        match input.entry {
            PdxAstItem::AssignmentList => visitor.visit_map(Children::new(&input.children)),
            _ => Err(Error(format!("Expected a block, found {:?}", input.entry))),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        // Absent keys never reach the deserializer; a present one is Some.
        visitor.visit_some(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        match self.word() {
            Some(variant) => visitor.visit_enum(variant.into_deserializer()),
            None => Err(Error(format!(
                "Expected an enum variant name, found {:?}",
                self.input.entry
            ))),
        }
    }

    forward_to_deserialize_any! {
        i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char bytes byte_buf unit unit_struct
        newtype_struct tuple tuple_struct ignored_any
    }
}

/// Walks the children of a block, either as sequence elements or as
/// `key = value` map entries.
struct Children<'de> {
    iter: std::slice::Iter<'de, PdxNode>,
    value: Option<&'de PdxNode>,
}

impl<'de> Children<'de> {
    fn new(children: &'de [PdxNode]) -> Self {
        Children {
            iter: children.iter(),
            value: None,
        }
    }
}

impl<'de> SeqAccess<'de> for Children<'de> {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>, Self::Error>
    where
        T: DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(node) => {
                let mut de = Deserializer::from_node(node);
                seed.deserialize(&mut de).map(Some)
            }
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

impl<'de> MapAccess<'de> for Children<'de> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>, Self::Error>
    where
        K: DeserializeSeed<'de>,
    {
        let Some(node) = self.iter.next() else {
            return Ok(None);
        };
        match (&node.entry, node.children.as_slice()) {
            (PdxAstItem::Assignment, [key_node, val_node]) => {
                self.value = Some(val_node);
                let mut de = Deserializer::from_node(key_node);
                seed.deserialize(&mut de).map(Some)
            }
            _ => Err(Error(format!(
                "Expected an assignment inside a block, got {:?}",
                node.entry
            ))),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value, Self::Error>
    where
        V: DeserializeSeed<'de>,
    {
        let val_node = self.value.take().ok_or(Error(
            "MapAccess::next_value called before next_key".to_string(),
        ))?;
        let mut de = Deserializer::from_node(val_node);
        seed.deserialize(&mut de)
    }
}
