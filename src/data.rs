//! 背包问题的基本数据格式：物品类型和物品目录。

use crate::error::Error;
use serde::{Deserialize, Serialize};

/// 一种物品，具有编号、体积和价值
///
/// 物品一经创建就不可变。候选解只按编号引用物品，不持有副本。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: usize,
    pub volume: u64,
    pub cost: u64,
}

/// 物品目录，即一组物品类型
///
/// 编号必须从 0 开始连续排列，体积和价值必须为正数。
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    pub fn new(items: Vec<Item>) -> Result<Self, Error> {
        if items.is_empty() {
            return Err("物品目录为空".into());
        }
        for (index, item) in items.iter().enumerate() {
            if item.id != index {
                return Err(format!("物品编号必须从 0 开始连续排列，第 {index} 项的编号为 {}", item.id).into());
            }
            if item.volume == 0 {
                return Err(format!("物品 {} 的体积必须为正数", item.id).into());
            }
            if item.cost == 0 {
                return Err(format!("物品 {} 的价值必须为正数", item.id).into());
            }
        }
        Ok(Self { items })
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
