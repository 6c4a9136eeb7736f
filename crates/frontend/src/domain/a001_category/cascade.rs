//! Каскад категорий: плоское представление дерева, построение цепочки
//! выпадающих списков и применение выбора. Все функции чистые, без I/O,
//! состояние живёт в сигналах вызывающих компонентов.

use contracts::domain::a001_category::CategoryNode;

// ============================================================================
// Flat view of the category tree
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct FlatCategory {
    pub id: String,
    pub name: String,
    /// None для корневых категорий (wire `parentId == 0`)
    pub parent_id: Option<String>,
    /// Глубина в дереве, корень = 0
    pub level: usize,
    pub has_children: bool,
}

/// Разворачивает дерево в плоский список: узел, затем его поддерево,
/// порядок соседей сохраняется (pre-order).
///
/// `parent_id` берётся из собственного wire-поля узла, а не из позиции
/// в дереве. Если API отдаёт рассинхрон между ними, он сохраняется.
pub fn flatten_tree(nodes: &[CategoryNode]) -> Vec<FlatCategory> {
    let mut out = Vec::new();
    push_nodes(nodes, 0, &mut out);
    out
}

fn push_nodes(nodes: &[CategoryNode], level: usize, out: &mut Vec<FlatCategory>) {
    for node in nodes {
        out.push(FlatCategory {
            id: node.category_id.to_string(),
            name: node.category_name.clone(),
            parent_id: if node.parent_id == 0 {
                None
            } else {
                Some(node.parent_id.to_string())
            },
            level,
            has_children: !node.children.is_empty(),
        });
        push_nodes(&node.children, level + 1, out);
    }
}

/// Восстанавливает путь от корня до категории `id` подъёмом по `parent_id`.
/// Возвращает пустой путь, если категории нет или цепочка оборвана.
/// Подъём ограничен `flat.len()` шагами на случай цикла в данных.
pub fn path_to(flat: &[FlatCategory], id: &str) -> SelectionPath {
    let mut chain: Vec<String> = Vec::new();
    let mut current = Some(id.to_string());
    while let Some(cur) = current {
        let cat = match flat.iter().find(|c| c.id == cur) {
            Some(c) => c,
            None => return SelectionPath::empty(),
        };
        chain.push(cat.id.clone());
        if chain.len() > flat.len() {
            return SelectionPath::empty();
        }
        current = cat.parent_id.clone();
    }
    chain.reverse();
    SelectionPath::from_ids(chain)
}

// ============================================================================
// Selection path
// ============================================================================

/// Цепочка идентификаторов от корневой категории к выбранной подкатегории.
/// Пустых идентификаторов внутри не бывает: конструкторы обрезают хвост
/// начиная с первого пустого элемента.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionPath {
    ids: Vec<String>,
}

impl SelectionPath {
    pub fn empty() -> Self {
        Self { ids: Vec::new() }
    }

    pub fn from_ids(ids: Vec<String>) -> Self {
        let cut = ids.iter().position(|id| id.is_empty()).unwrap_or(ids.len());
        Self {
            ids: ids.into_iter().take(cut).collect(),
        }
    }

    /// Собирает путь из legacy-пары полей карточки товара.
    pub fn from_legacy(category_id: &str, sub_category_path: &[String]) -> Self {
        if category_id.is_empty() {
            return Self::empty();
        }
        let mut ids = vec![category_id.to_string()];
        ids.extend(sub_category_path.iter().cloned());
        Self::from_ids(ids)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Раскладывает путь обратно в legacy-пару: корень и подкатегории.
    pub fn to_legacy(&self) -> (String, Vec<String>) {
        match self.ids.split_first() {
            Some((root, rest)) => (root.clone(), rest.to_vec()),
            None => (String::new(), Vec::new()),
        }
    }
}

// ============================================================================
// Level builder
// ============================================================================

/// Описание одного выпадающего списка в цепочке. Живёт один рендер:
/// пересчитывается при каждом изменении пути или плоского списка.
#[derive(Debug, Clone, PartialEq)]
pub struct CascadeLevel {
    pub level: usize,
    pub options: Vec<FlatCategory>,
    /// "" означает, что на этом уровне ничего не выбрано
    pub selected_id: String,
}

/// Строит цепочку уровней для текущего пути.
///
/// Уровень 0 присутствует всегда. Дальше по одному уровню на каждый
/// выбранный элемент пути, пока у выбранного есть дети в плоском списке.
/// Если детей нет, построение останавливается, остаток пути игнорируется.
pub fn build_levels(path: &SelectionPath, flat: &[FlatCategory]) -> Vec<CascadeLevel> {
    let ids = path.ids();
    let mut levels = vec![CascadeLevel {
        level: 0,
        options: children_of(flat, None),
        selected_id: ids.first().cloned().unwrap_or_default(),
    }];

    for (i, selected) in ids.iter().enumerate() {
        let options = children_of(flat, Some(selected));
        if options.is_empty() {
            // Последний элемент пути помечен как имеющий детей, но детей
            // в плоском списке нет (устаревший флаг либо неполная выгрузка).
            // Показываем пустой хвостовой уровень вместо обрыва цепочки.
            if i + 1 == ids.len() && has_children_flag(flat, selected) {
                levels.push(CascadeLevel {
                    level: i + 1,
                    options: Vec::new(),
                    selected_id: String::new(),
                });
            }
            return levels;
        }
        levels.push(CascadeLevel {
            level: i + 1,
            options,
            selected_id: ids.get(i + 1).cloned().unwrap_or_default(),
        });
    }
    levels
}

fn children_of(flat: &[FlatCategory], parent: Option<&str>) -> Vec<FlatCategory> {
    flat.iter()
        .filter(|c| c.parent_id.as_deref() == parent)
        .cloned()
        .collect()
}

fn has_children_flag(flat: &[FlatCategory], id: &str) -> bool {
    flat.iter().any(|c| c.id == id && c.has_children)
}

// ============================================================================
// Selection reconciler
// ============================================================================

/// Результат применения выбора: новый путь плюс производное legacy-поле
/// для старого формата карточки товара.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionUpdate {
    pub path: SelectionPath,
    /// Самая глубокая выбранная подкатегория, "" если путь короче двух уровней
    pub legacy_sub_category_id: String,
}

/// Применяет выбор в списке уровня `level_index` к текущему пути.
///
/// Уровень 0 задаёт путь целиком: либо `[new_value]`, либо пустой.
/// Уровень i > 0 обрезает путь до первых i элементов и дописывает
/// `new_value`, если тот непустой. Выбор глубже уровня отбрасывается.
pub fn apply_selection(path: &SelectionPath, level_index: usize, new_value: &str) -> SelectionUpdate {
    let ids = path.ids();
    let keep = level_index.min(ids.len());
    let mut next: Vec<String> = ids[..keep].to_vec();
    if !new_value.is_empty() {
        next.push(new_value.to_string());
    }
    let next = SelectionPath::from_ids(next);

    // Корень никогда не дублируется в legacy-поле подкатегории
    let legacy_sub_category_id = if next.len() >= 2 {
        next.ids().last().cloned().unwrap_or_default()
    } else {
        String::new()
    };

    SelectionUpdate {
        path: next,
        legacy_sub_category_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_category::CategoryNode;

    fn sample_tree() -> Vec<CategoryNode> {
        vec![
            CategoryNode::new(1, "Электроника", 0)
                .with_children(vec![CategoryNode::new(2, "Телефоны", 1)]),
            CategoryNode::new(3, "Одежда", 0),
        ]
    }

    fn deep_tree() -> Vec<CategoryNode> {
        vec![
            CategoryNode::new(1, "Электроника", 0).with_children(vec![
                CategoryNode::new(2, "Телефоны", 1).with_children(vec![
                    CategoryNode::new(3, "Смартфоны", 2),
                    CategoryNode::new(4, "Кнопочные", 2),
                ]),
                CategoryNode::new(5, "Ноутбуки", 1),
            ]),
            CategoryNode::new(6, "Одежда", 0),
        ]
    }

    fn path(ids: &[&str]) -> SelectionPath {
        SelectionPath::from_ids(ids.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_flatten_pre_order_with_levels() {
        let flat = flatten_tree(&sample_tree());
        let ids: Vec<&str> = flat.iter().map(|c| c.id.as_str()).collect();
        let levels: Vec<usize> = flat.iter().map(|c| c.level).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(levels, vec![0, 1, 0]);
        assert_eq!(flat[1].name, "Телефоны");
    }

    #[test]
    fn test_flatten_normalizes_parent_id() {
        let flat = flatten_tree(&sample_tree());
        assert_eq!(flat[0].parent_id, None);
        assert_eq!(flat[1].parent_id, Some("1".to_string()));

        // parentId берётся из wire-поля узла, даже без родителя в выгрузке
        let orphan = flatten_tree(&[CategoryNode::new(7, "Сироты", 5)]);
        assert_eq!(orphan[0].parent_id, Some("5".to_string()));
    }

    #[test]
    fn test_flatten_has_children_flag() {
        let flat = flatten_tree(&deep_tree());
        let by_id = |id: &str| flat.iter().find(|c| c.id == id).unwrap();
        assert!(by_id("1").has_children);
        assert!(by_id("2").has_children);
        assert!(!by_id("3").has_children);
        assert!(!by_id("6").has_children);
    }

    #[test]
    fn test_clearing_middle_level_truncates_tail() {
        let update = apply_selection(&path(&["1", "2", "3"]), 2, "");
        assert_eq!(update.path, path(&["1", "2"]));
        assert_eq!(update.legacy_sub_category_id, "2");
    }

    #[test]
    fn test_root_change_resets_path() {
        let update = apply_selection(&path(&["1", "2", "3"]), 0, "9");
        assert_eq!(update.path, path(&["9"]));
        assert_eq!(update.legacy_sub_category_id, "");

        let cleared = apply_selection(&path(&["1", "2", "3"]), 0, "");
        assert!(cleared.path.is_empty());
        assert_eq!(cleared.legacy_sub_category_id, "");
    }

    #[test]
    fn test_levels_parent_consistent_through_scenario() {
        let flat = flatten_tree(&deep_tree());

        let mut current = SelectionPath::empty();
        for (level_index, value) in [(0usize, "1"), (1, "2"), (2, "3")] {
            current = apply_selection(&current, level_index, value).path;
            let levels = build_levels(&current, &flat);
            for lvl in levels.iter().skip(1) {
                let parent = &current.ids()[lvl.level - 1];
                assert!(lvl
                    .options
                    .iter()
                    .all(|o| o.parent_id.as_deref() == Some(parent.as_str())));
            }
        }

        let levels = build_levels(&current, &flat);
        assert_eq!(levels.len(), 3);
        assert_eq!(levels[2].selected_id, "3");
    }

    #[test]
    fn test_build_levels_idempotent() {
        let flat = flatten_tree(&deep_tree());
        let p = path(&["1", "2"]);
        assert_eq!(build_levels(&p, &flat), build_levels(&p, &flat));
    }

    #[test]
    fn test_empty_flat_gives_single_root_level() {
        let levels = build_levels(&SelectionPath::empty(), &[]);
        assert_eq!(levels.len(), 1);
        assert_eq!(levels[0].level, 0);
        assert!(levels[0].options.is_empty());
        assert_eq!(levels[0].selected_id, "");
    }

    #[test]
    fn test_trailing_empty_level_for_stale_children_flag() {
        // Флаг has_children взведён, но детей в списке нет
        let flat = vec![FlatCategory {
            id: "1".to_string(),
            name: "Электроника".to_string(),
            parent_id: None,
            level: 0,
            has_children: true,
        }];
        let levels = build_levels(&path(&["1"]), &flat);
        assert_eq!(levels.len(), 2);
        assert!(levels[1].options.is_empty());
        assert_eq!(levels[1].selected_id, "");
    }

    #[test]
    fn test_stale_tail_beyond_leaf_is_ignored() {
        let flat = flatten_tree(&deep_tree());
        // "6" лист без детей, хвост пути не порождает уровней
        let levels = build_levels(&path(&["6", "5"]), &flat);
        assert_eq!(levels.len(), 1);
        assert_eq!(levels[0].selected_id, "6");
    }

    #[test]
    fn test_path_to_rebuilds_ancestor_chain() {
        let flat = flatten_tree(&deep_tree());
        assert_eq!(path_to(&flat, "3"), path(&["1", "2", "3"]));
        assert_eq!(path_to(&flat, "6"), path(&["6"]));
        assert!(path_to(&flat, "404").is_empty());
    }

    #[test]
    fn test_path_to_survives_parent_cycle() {
        let cycle = vec![
            FlatCategory {
                id: "1".to_string(),
                name: "А".to_string(),
                parent_id: Some("2".to_string()),
                level: 0,
                has_children: true,
            },
            FlatCategory {
                id: "2".to_string(),
                name: "Б".to_string(),
                parent_id: Some("1".to_string()),
                level: 1,
                has_children: true,
            },
        ];
        assert!(path_to(&cycle, "1").is_empty());
    }

    #[test]
    fn test_selection_path_truncates_at_first_empty_id() {
        let p = SelectionPath::from_ids(vec!["1".to_string(), String::new(), "3".to_string()]);
        assert_eq!(p, path(&["1"]));
    }

    #[test]
    fn test_selection_path_legacy_round_trip() {
        let p = SelectionPath::from_legacy("1", &["2".to_string(), "3".to_string()]);
        assert_eq!(p, path(&["1", "2", "3"]));
        assert_eq!(p.to_legacy(), ("1".to_string(), vec!["2".to_string(), "3".to_string()]));

        assert!(SelectionPath::from_legacy("", &["2".to_string()]).is_empty());
        assert_eq!(SelectionPath::empty().to_legacy(), (String::new(), Vec::new()));
    }
}
