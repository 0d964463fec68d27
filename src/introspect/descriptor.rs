//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了类型描述符：成员列表、成员访问器和零值构造路径。

use super::shape::Shape;
use super::{Persist, Persistable};
use crate::error::{IntrospectionError, Result};
use crate::value::Value;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

type Getter = Arc<dyn Fn(&dyn Any) -> Result<Value> + Send + Sync>;
type Setter = Arc<dyn Fn(&mut dyn Any, Value) -> Result<()> + Send + Sync>;

/// 零值实例的构造函数
pub type Constructor = fn() -> Box<dyn Persistable>;

/// 可持久化成员的描述
#[derive(Clone)]
pub struct MemberDescriptor {
    name: String,
    shape: Shape,
    getter: Getter,
    setter: Setter,
}

impl MemberDescriptor {
    /// 创建成员描述
    ///
    /// # 参数
    ///
    /// * `name` - 成员名，决定成员在计划中的顺序
    /// * `get` - 从宿主借用成员
    /// * `get_mut` - 从宿主可变借用成员
    pub fn new<T, F>(name: impl Into<String>, get: fn(&T) -> &F, get_mut: fn(&mut T) -> &mut F) -> Self
    where
        T: 'static,
        F: Persist,
    {
        let host = std::any::type_name::<T>();
        Self {
            name: name.into(),
            shape: F::shape(),
            getter: Arc::new(move |target: &dyn Any| -> Result<Value> {
                let target = target
                    .downcast_ref::<T>()
                    .ok_or_else(|| IntrospectionError::TargetMismatch(host.to_string()))?;
                Ok(get(target).to_value())
            }),
            setter: Arc::new(move |target: &mut dyn Any, value: Value| -> Result<()> {
                let target = target
                    .downcast_mut::<T>()
                    .ok_or_else(|| IntrospectionError::TargetMismatch(host.to_string()))?;
                *get_mut(target) = F::from_value(value)?;
                Ok(())
            }),
        }
    }

    /// 将祖先类型的成员重定向到内嵌该祖先的类型上
    pub fn lift<T, P>(&self, get: fn(&T) -> &P, get_mut: fn(&mut T) -> &mut P) -> Self
    where
        T: 'static,
        P: 'static,
    {
        let host = std::any::type_name::<T>();
        let inner_get = Arc::clone(&self.getter);
        let inner_set = Arc::clone(&self.setter);
        Self {
            name: self.name.clone(),
            shape: self.shape.clone(),
            getter: Arc::new(move |target: &dyn Any| -> Result<Value> {
                let target = target
                    .downcast_ref::<T>()
                    .ok_or_else(|| IntrospectionError::TargetMismatch(host.to_string()))?;
                inner_get(get(target) as &dyn Any)
            }),
            setter: Arc::new(move |target: &mut dyn Any, value: Value| -> Result<()> {
                let target = target
                    .downcast_mut::<T>()
                    .ok_or_else(|| IntrospectionError::TargetMismatch(host.to_string()))?;
                inner_set(get_mut(target) as &mut dyn Any, value)
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// 读取成员当前值
    pub fn get(&self, target: &dyn Any) -> Result<Value> {
        (self.getter)(target)
    }

    /// 写入成员值
    pub fn set(&self, target: &mut dyn Any, value: Value) -> Result<()> {
        (self.setter)(target, value)
    }
}

impl fmt::Debug for MemberDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberDescriptor")
            .field("name", &self.name)
            .field("shape", &self.shape)
            .finish()
    }
}

/// 组合类型描述符
///
/// 成员按声明顺序保存（自身字段在前，祖先成员在后），排序由成员计划负责。
pub struct TypeDescriptor {
    name: String,
    members: Vec<MemberDescriptor>,
    constructor: Option<Constructor>,
}

impl TypeDescriptor {
    pub fn new(
        name: impl Into<String>,
        members: Vec<MemberDescriptor>,
        constructor: Option<Constructor>,
    ) -> Self {
        Self {
            name: name.into(),
            members,
            constructor,
        }
    }

    /// 完全限定类型名
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &[MemberDescriptor] {
        &self.members
    }

    /// 创建零值实例
    ///
    /// # 返回值
    ///
    /// 类型没有零参数构造路径时返回 `NoDefaultConstructor`
    pub fn instantiate(&self) -> std::result::Result<Box<dyn Persistable>, IntrospectionError> {
        match self.constructor {
            Some(construct) => Ok(construct()),
            None => Err(IntrospectionError::NoDefaultConstructor(self.name.clone())),
        }
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("members", &self.members)
            .field("constructible", &self.constructor.is_some())
            .finish()
    }
}

/// 枚举描述符，常量按声明顺序排列
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDescriptor {
    name: String,
    variants: Vec<&'static str>,
}

impl EnumDescriptor {
    pub fn new(name: impl Into<String>, variants: Vec<&'static str>) -> Self {
        Self {
            name: name.into(),
            variants,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variants(&self) -> &[&'static str] {
        &self.variants
    }

    /// 按序号取常量名
    pub fn variant(&self, ordinal: u32) -> Option<&'static str> {
        self.variants.get(ordinal as usize).copied()
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}
