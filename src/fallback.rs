//! Built-in roster used when the data file cannot be read.

use crate::entity::Entity;

const ROSTER: [(&str, &str, &str, &str, &str, &str); 30] = [
    ("邵寓桥", "男", "20090427", "大三", "安徽", "二刺猿"),
    ("孙瑜", "男", "20090330", "大二", "江苏", "摄影"),
    ("张熙泰", "男", "20081222", "大一", "广东", "足球"),
    ("刘锦东", "男", "20081219", "大二", "安徽", "uuu 足球"),
    ("杨昊鸣", "男", "20081215", "大一", "江苏", "足球"),
    ("陈子非", "男", "20081005", "大二", "北京", "二刺猿"),
    ("赵钟悦", "男", "20080920", "大一", "北京", "神人 农批"),
    ("院国亨", "男", "20080613", "高三", "北京", "农批"),
    ("孔令安", "男", "20080609", "大一", "香港", "追星"),
    ("石勃翔", "男", "20080516", "大二", "北京", ""),
    ("田甦文", "男", "20080513", "大二", "天津", "农批 足球"),
    ("张家齐", "男", "20080415", "高三", "北京", "足球"),
    ("徐乐礼", "男", "20080331", "大二", "北京", "二刺猿"),
    ("孟白", "男", "20080319", "大二", "北京", ""),
    ("刘霁元", "男", "20080313", "大一", "香港", "摄影"),
    ("孙瀚铮", "男", "20080312", "高三", "北京", ""),
    ("彭厚超", "男", "20080111", "高三", "底特律", ""),
    ("唐源博", "男", "20080111", "大二", "北京", "神人"),
    ("李林峰", "男", "20080101", "大二", "香港", "二刺猿 农批"),
    ("赵衍舒", "女", "20090604", "大一", "蒙特利尔", "农批"),
    ("王孙佳悦", "女", "20090128", "高三", "北京", "足球"),
    ("徐在菁", "女", "20080725", "大二", "北京", ""),
    ("刘子与", "女", "20080523", "高三", "北京", "追星"),
    ("潘玥含", "女", "20080428", "大二", "北京", "农批 足球"),
    ("孙依瑶", "女", "20080418", "大二", "北京", "追星"),
    ("徐晏熹", "女", "20080408", "大二", "北京", ""),
    ("何欣蕾", "女", "20080306", "大二", "香港", ""),
    ("范文", "女", "20080227", "大二", "上海", "uuu 二刺猿 农批"),
    ("邓馨恬", "女", "20080207", "大一", "悉尼", "二刺猿 农批"),
    ("张婧菲", "女", "20080202", "高三", "北京", "二刺猿"),
];

/// The embedded dataset, in roster order.
pub fn fallback_characters() -> Vec<Entity> {
    ROSTER
        .iter()
        .map(|&(name, gender, birth_date, grade, location, hobby)| {
            Entity::new(name, gender, birth_date, grade, location, hobby)
        })
        .collect()
}
